use crate::feedback::{Feedback, LetterColor, compute_feedback, is_solved};
use crate::wordbank::{WORD_LENGTH, Word, Wordbank, WordbankError};
use crate::{debug_log, info_log};
use rand::Rng;
use std::collections::BTreeMap;
use thiserror::Error;

pub const MAX_GUESSES: usize = 6;

pub const INVALID_GUESS_MESSAGE: &str = "Guess must be a valid 5-letter word!";
pub const WIN_MESSAGE: &str = "Congratulations! You guessed the word!";

#[must_use]
pub fn loss_message(target: &Word) -> String {
    format!("Game over! The word was \"{target}\".")
}

/// Why a submitted guess was rejected. Both kinds surface to the player as
/// the same message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuessError {
    #[error("{}", INVALID_GUESS_MESSAGE)]
    WrongLength(usize),

    #[error("{}", INVALID_GUESS_MESSAGE)]
    NotInWordList(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessRecord {
    guess: Word,
    feedback: Feedback,
}

impl GuessRecord {
    #[must_use]
    pub fn guess(&self) -> &Word {
        &self.guess
    }

    #[must_use]
    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    pub fn letters(&self) -> impl Iterator<Item = (char, LetterColor)> + '_ {
        self.guess.letters().zip(self.feedback.iter().copied())
    }
}

/// Edits to the input buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditAction {
    Append(char),
    Backspace,
    /// Replace the whole buffer, e.g. from a line of text.
    SetRaw(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The game was already over.
    Ignored,
    Rejected(GuessError),
    Accepted(GameStatus),
}

/// Best color seen for each letter across `history`.
#[must_use]
pub fn aggregate_key_colors(history: &[GuessRecord]) -> BTreeMap<char, LetterColor> {
    let mut colors = BTreeMap::new();
    for (letter, color) in history.iter().flat_map(GuessRecord::letters) {
        colors
            .entry(letter)
            .and_modify(|best: &mut LetterColor| *best = (*best).max(color))
            .or_insert(color);
    }
    colors
}

/// Everything a renderer needs to draw the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    target: Word,
    history: Vec<GuessRecord>,
    input: String,
    key_colors: BTreeMap<char, LetterColor>,
    game_over: bool,
    message: String,
}

impl GameState {
    fn new(target: Word) -> Self {
        Self {
            target,
            history: Vec::with_capacity(MAX_GUESSES),
            input: String::with_capacity(WORD_LENGTH),
            key_colors: BTreeMap::new(),
            game_over: false,
            message: String::new(),
        }
    }

    #[must_use]
    pub fn target(&self) -> &Word {
        &self.target
    }

    #[must_use]
    pub fn history(&self) -> &[GuessRecord] {
        &self.history
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub fn key_colors(&self) -> &BTreeMap<char, LetterColor> {
        &self.key_colors
    }

    #[must_use]
    pub fn key_color(&self, letter: char) -> Option<LetterColor> {
        self.key_colors.get(&letter.to_ascii_lowercase()).copied()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn attempts_remaining(&self) -> usize {
        MAX_GUESSES - self.history.len()
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        match self.history.last() {
            _ if !self.game_over => GameStatus::InProgress,
            Some(last) if last.guess == self.target => GameStatus::Won,
            _ => GameStatus::Lost,
        }
    }
}

/// One game: a fixed target drawn from the wordbank plus the player's
/// progress towards it.
#[derive(Debug)]
pub struct GameSession<'a> {
    wordbank: &'a Wordbank,
    state: GameState,
}

impl<'a> GameSession<'a> {
    /// Start a session with a target drawn uniformly from `wordbank`.
    pub fn new<R: Rng>(wordbank: &'a Wordbank, rng: &mut R) -> Self {
        let target = wordbank.random_word(rng).clone();
        info_log!("New session with {} words", wordbank.len());
        Self {
            wordbank,
            state: GameState::new(target),
        }
    }

    /// Start a session with a known target.
    ///
    /// # Errors
    /// Returns `WordbankError::UnknownWord` if `target` is not in `wordbank`.
    pub fn with_target(wordbank: &'a Wordbank, target: &str) -> Result<Self, WordbankError> {
        let target = wordbank.get(target)?.clone();
        Ok(Self {
            wordbank,
            state: GameState::new(target),
        })
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn word_count(&self) -> usize {
        self.wordbank.len()
    }

    /// Apply an edit to the input buffer. Ignored once the game is over.
    pub fn edit_input(&mut self, action: EditAction) {
        if self.state.game_over {
            debug_log!("edit_input() - game over, ignoring {:?}", action);
            return;
        }
        let input = &mut self.state.input;
        match action {
            EditAction::Append(c) if c.is_ascii_alphabetic() && input.len() < WORD_LENGTH => {
                input.push(c.to_ascii_lowercase());
            }
            EditAction::Append(_) => {}
            EditAction::Backspace => {
                input.pop();
            }
            EditAction::SetRaw(text) => {
                *input = text
                    .chars()
                    .filter(char::is_ascii_alphabetic)
                    .map(|c| c.to_ascii_lowercase())
                    .take(WORD_LENGTH)
                    .collect();
            }
        }
        debug_log!("edit_input() - buffer now '{}'", self.state.input);
    }

    fn validate_input(&self) -> Result<Word, GuessError> {
        let input = &self.state.input;
        if input.len() != WORD_LENGTH {
            return Err(GuessError::WrongLength(input.len()));
        }
        self.wordbank
            .get(input)
            .cloned()
            .map_err(|_| GuessError::NotInWordList(input.clone()))
    }

    /// Submit the input buffer as a guess.
    pub fn submit_guess(&mut self) -> SubmitOutcome {
        if self.state.game_over {
            debug_log!("submit_guess() - game over, ignoring");
            return SubmitOutcome::Ignored;
        }

        let guess = match self.validate_input() {
            Ok(guess) => guess,
            Err(e) => {
                info_log!("submit_guess() - rejected '{}': {:?}", self.state.input, e);
                self.state.message = INVALID_GUESS_MESSAGE.to_string();
                return SubmitOutcome::Rejected(e);
            }
        };

        let feedback = compute_feedback(&guess, &self.state.target);
        let won = guess == self.state.target;
        debug_assert_eq!(won, is_solved(&feedback));
        self.state.history.push(GuessRecord { guess, feedback });
        self.state.input.clear();
        self.state.key_colors = aggregate_key_colors(&self.state.history);

        let status = if won {
            self.state.message = WIN_MESSAGE.to_string();
            self.state.game_over = true;
            GameStatus::Won
        } else if self.state.history.len() >= MAX_GUESSES {
            self.state.message = loss_message(&self.state.target);
            self.state.game_over = true;
            GameStatus::Lost
        } else {
            self.state.message.clear();
            GameStatus::InProgress
        };
        info_log!(
            "submit_guess() - guess {} accepted, status {:?}",
            self.state.history.len(),
            status
        );
        SubmitOutcome::Accepted(status)
    }
}

/// Input the game loop receives from an interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Edit(EditAction),
    Submit,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Won { attempts: usize },
    Lost,
    Quit,
}

/// Trait for the front end driving a game (TUI or line-oriented CLI).
pub trait GameInterface {
    /// Display the opening screen.
    fn display_welcome(&mut self, state: &GameState, word_count: usize);

    /// Return the next action, or `None` if nothing happened yet.
    fn read_action(&mut self, state: &GameState) -> Option<UserAction>;

    /// Refresh the display after a transition.
    fn display_state(&mut self, state: &GameState);

    /// Show the final board; returns once the player has seen it.
    fn display_game_over(&mut self, state: &GameState);

    fn display_exit_message(&mut self);
}

/// Run one game until it ends or the player exits.
pub fn game_loop<I: GameInterface>(session: &mut GameSession, interface: &mut I) -> GameOutcome {
    interface.display_welcome(session.state(), session.word_count());

    loop {
        let Some(action) = interface.read_action(session.state()) else {
            continue;
        };
        debug_log!("game_loop() - action {:?}", action);

        match action {
            UserAction::Exit => {
                interface.display_exit_message();
                return GameOutcome::Quit;
            }
            UserAction::Edit(edit) => session.edit_input(edit),
            UserAction::Submit => {
                session.submit_guess();
            }
        }

        let state = session.state();
        if state.is_game_over() {
            interface.display_game_over(state);
            return match state.status() {
                GameStatus::Won => GameOutcome::Won {
                    attempts: state.history().len(),
                },
                GameStatus::Lost | GameStatus::InProgress => GameOutcome::Lost,
            };
        }
        interface.display_state(state);
    }
}
