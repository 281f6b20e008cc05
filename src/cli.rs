use crate::feedback::LetterColor;
use crate::game_state::{
    EditAction, GameInterface, GameState, GuessRecord, MAX_GUESSES, UserAction,
};
use crate::wordbank::WORD_LENGTH;
use clap::Parser;
use std::collections::VecDeque;
use std::io::BufRead;
use std::path::PathBuf;

/// WordQuest: guess the hidden five-letter word in six tries
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited word list
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<PathBuf>,

    /// Read guesses line by line from stdin instead of the full-screen UI
    #[arg(long)]
    pub plain: bool,

    /// Seed for picking the target word
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,

    /// Log file path (defaults to the user cache directory)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// On-screen keyboard layout, shared with the TUI.
pub const KEYBOARD_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];

// UI Input/Output functions

#[derive(Debug, PartialEq, Eq)]
pub enum LineInput {
    Word(String),
    Invalid,
    Blank,
    Exit,
}

fn is_valid_word(word: &str) -> bool {
    word.len() == WORD_LENGTH && word.chars().all(|c| c.is_ascii_alphabetic())
}

#[must_use]
pub fn parse_line(line: &str) -> LineInput {
    let line = line.trim();
    match line.to_ascii_lowercase().as_str() {
        "" => LineInput::Blank,
        "exit" | "quit" => LineInput::Exit,
        _ if is_valid_word(line) => LineInput::Word(line.to_ascii_lowercase()),
        _ => LineInput::Invalid,
    }
}

/// `C R A N E  🟩⬛🟨⬛⬛`
#[must_use]
pub fn format_guess_row(record: &GuessRecord) -> String {
    let letters: Vec<String> = record
        .guess()
        .letters()
        .map(|c| c.to_ascii_uppercase().to_string())
        .collect();
    let colors: String = record.feedback().iter().map(|c| c.to_emoji()).collect();
    format!("{}  {}", letters.join(" "), colors)
}

fn format_key(letter: char, color: Option<LetterColor>) -> String {
    let upper = letter.to_ascii_uppercase();
    match color {
        Some(LetterColor::Green) => format!("[{upper}]"),
        Some(LetterColor::Yellow) => format!("({upper})"),
        Some(LetterColor::Gray) => " . ".to_string(),
        None => format!(" {upper} "),
    }
}

/// Keyboard rows with used letters marked: `[A]` green, `(A)` yellow, `.` gray.
#[must_use]
pub fn format_keyboard(state: &GameState) -> Vec<String> {
    KEYBOARD_ROWS
        .iter()
        .map(|row| {
            row.chars()
                .map(|c| format_key(c, state.key_color(c)))
                .collect::<String>()
        })
        .collect()
}

pub fn display_board(state: &GameState) {
    for record in state.history() {
        println!("{}", format_guess_row(record));
    }
    for _ in state.history().len()..MAX_GUESSES {
        println!("{}", ["_"; WORD_LENGTH].join(" "));
    }
    println!();
    for row in format_keyboard(state) {
        println!("{row}");
    }
}

pub fn display_message(state: &GameState) {
    if !state.message().is_empty() {
        println!("{}", state.message());
    }
}

/// CLI implementation of the `GameInterface` trait.
/// Each line read is one guess, queued as a buffer replacement and a submit.
pub struct CliInterface<R: BufRead> {
    reader: R,
    pending: VecDeque<UserAction>,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    fn read_line(&mut self) -> LineInput {
        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            Ok(0) => LineInput::Exit,
            Ok(_) => parse_line(&input),
            Err(e) => {
                log::warn!("Failed to read guess: {e}");
                LineInput::Exit
            }
        }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_welcome(&mut self, state: &GameState, word_count: usize) {
        println!("WordQuest - guess the {WORD_LENGTH}-letter word in {MAX_GUESSES} tries.");
        println!("Loaded {word_count} words.");
        display_board(state);
    }

    fn read_action(&mut self, state: &GameState) -> Option<UserAction> {
        if let Some(action) = self.pending.pop_front() {
            return Some(action);
        }

        println!(
            "\nGuess {}/{MAX_GUESSES} (or 'exit' to quit):",
            state.history().len() + 1
        );
        let raw = match self.read_line() {
            LineInput::Exit => return Some(UserAction::Exit),
            LineInput::Blank => return None,
            LineInput::Word(word) => word,
            // Submitted empty so the session reports the invalid guess.
            LineInput::Invalid => String::new(),
        };
        self.pending.push_back(UserAction::Submit);
        Some(UserAction::Edit(EditAction::SetRaw(raw)))
    }

    fn display_state(&mut self, state: &GameState) {
        // Only redraw once the whole line has been applied.
        if !self.pending.is_empty() {
            return;
        }
        display_board(state);
        display_message(state);
    }

    fn display_game_over(&mut self, state: &GameState) {
        display_board(state);
        display_message(state);
    }

    fn display_exit_message(&mut self) {
        println!("Exiting.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::{GameOutcome, GameSession, game_loop};
    use crate::wordbank::load_wordbank_from_str;
    use std::io::Cursor;

    #[test]
    fn test_parse_cli_no_args() {
        let cli = Cli::try_parse_from(["wordquest"]).unwrap();
        assert_eq!(cli.wordbank_path, None);
        assert!(!cli.plain);
        assert_eq!(cli.seed, None);
        assert!(!cli.verbose);
        assert_eq!(cli.log_file, None);
    }

    #[test]
    fn test_parse_cli_all_options() {
        let cli = Cli::try_parse_from([
            "wordquest",
            "-i",
            "words.txt",
            "--plain",
            "--seed",
            "42",
            "-v",
            "--log-file",
            "/tmp/wq.log",
        ])
        .unwrap();
        assert_eq!(cli.wordbank_path, Some(PathBuf::from("words.txt")));
        assert!(cli.plain);
        assert_eq!(cli.seed, Some(42));
        assert!(cli.verbose);
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/wq.log")));
    }

    #[test]
    fn test_parse_cli_rejects_bad_seed() {
        assert!(Cli::try_parse_from(["wordquest", "--seed", "abc"]).is_err());
    }

    #[test]
    fn test_is_valid_word() {
        assert!(is_valid_word("CRANE"));
        assert!(is_valid_word("crane"));
        assert!(!is_valid_word("CRAN")); // Too short
        assert!(!is_valid_word("CRANES")); // Too long
        assert!(!is_valid_word("CRAN3")); // Contains digit
        assert!(!is_valid_word("")); // Empty
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("  CRANE \n"), LineInput::Word("crane".to_string()));
        assert_eq!(parse_line("exit\n"), LineInput::Exit);
        assert_eq!(parse_line("QUIT"), LineInput::Exit);
        assert_eq!(parse_line("\n"), LineInput::Blank);
        assert_eq!(parse_line("cranes"), LineInput::Invalid);
        assert_eq!(parse_line("cr4ne"), LineInput::Invalid);
    }

    fn session_after(bank_words: &str, target: &str, guesses: &[&str]) -> GameState {
        let bank = load_wordbank_from_str(bank_words).unwrap();
        let mut session = GameSession::with_target(&bank, target).unwrap();
        for guess in guesses {
            session.edit_input(EditAction::SetRaw((*guess).to_string()));
            session.submit_guess();
        }
        session.state().clone()
    }

    #[test]
    fn test_format_guess_row() {
        let state = session_after("crane\nreact", "react", &["crane"]);
        assert_eq!(format_guess_row(&state.history()[0]), "C R A N E  🟨🟨🟩⬛🟨");
    }

    #[test]
    fn test_format_keyboard_marks_colors() {
        let state = session_after("crane\nreact", "react", &["crane"]);
        let rows = format_keyboard(&state);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], " Q  W (E)(R) T  Y  U  I  O  P ");
        assert_eq!(rows[1], "[A] S  D  F  G  H  J  K  L ");
        assert_eq!(rows[2], " Z  X (C) V  B  .  M ");
    }

    #[test]
    fn test_read_action_queues_submit() {
        let state = session_after("crane", "crane", &[]);
        let mut interface = CliInterface::new(Cursor::new("crane\n"));
        assert_eq!(
            interface.read_action(&state),
            Some(UserAction::Edit(EditAction::SetRaw("crane".to_string())))
        );
        assert_eq!(interface.read_action(&state), Some(UserAction::Submit));
        // End of input quits.
        assert_eq!(interface.read_action(&state), Some(UserAction::Exit));
    }

    #[test]
    fn test_read_action_invalid_line_submits_empty() {
        let state = session_after("crane", "crane", &[]);
        let mut interface = CliInterface::new(Cursor::new("cranes\n"));
        assert_eq!(
            interface.read_action(&state),
            Some(UserAction::Edit(EditAction::SetRaw(String::new())))
        );
        assert_eq!(interface.read_action(&state), Some(UserAction::Submit));
    }

    #[test]
    fn test_read_action_blank_line() {
        let state = session_after("crane", "crane", &[]);
        let mut interface = CliInterface::new(Cursor::new("\nexit\n"));
        assert_eq!(interface.read_action(&state), None);
        assert_eq!(interface.read_action(&state), Some(UserAction::Exit));
    }

    #[test]
    fn test_game_loop_immediate_exit() {
        let bank = load_wordbank_from_str("crane\nslate\nraise").unwrap();
        let mut session = GameSession::with_target(&bank, "slate").unwrap();
        let mut interface = CliInterface::new(Cursor::new("exit\n"));
        assert_eq!(game_loop(&mut session, &mut interface), GameOutcome::Quit);
    }

    #[test]
    fn test_game_loop_invalid_then_win() {
        let bank = load_wordbank_from_str("crane\nslate\nraise").unwrap();
        let mut session = GameSession::with_target(&bank, "slate").unwrap();
        let mut interface = CliInterface::new(Cursor::new("abc\nzzzzz\nCRANE\nslate\n"));
        assert_eq!(
            game_loop(&mut session, &mut interface),
            GameOutcome::Won { attempts: 2 }
        );
    }

    #[test]
    fn test_game_loop_end_of_input() {
        let bank = load_wordbank_from_str("crane\nslate\nraise").unwrap();
        let mut session = GameSession::with_target(&bank, "slate").unwrap();
        let mut interface = CliInterface::new(Cursor::new("crane\n"));
        assert_eq!(game_loop(&mut session, &mut interface), GameOutcome::Quit);
        assert_eq!(session.state().history().len(), 1);
    }
}
