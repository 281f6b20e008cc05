//! TUI (Terminal User Interface) module for WordQuest
//!
//! Renders the board, the on-screen keyboard and the session message with
//! Ratatui, and turns crossterm key events into `UserAction`s.
//!
//! # Layout
//! Title, 6×5 board, keyboard tinted by the best color seen per letter,
//! message line, key help.

use crate::cli::KEYBOARD_ROWS;
use crate::feedback::LetterColor;
use crate::game_state::{
    EditAction, GameInterface, GameState, GameStatus, MAX_GUESSES, UserAction,
};
use crate::wordbank::WORD_LENGTH;
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent,
        KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ROW_SPACING: u16 = 2;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

/// Tile style: (background, foreground) per color, `None` for unused.
fn tile_style(color: Option<LetterColor>) -> Style {
    let (bg, fg) = match color {
        Some(LetterColor::Green) => (Color::Green, Color::Black),
        Some(LetterColor::Yellow) => (Color::Yellow, Color::Black),
        Some(LetterColor::Gray) => (Color::Gray, Color::White),
        None => (Color::DarkGray, Color::White),
    };
    Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD)
}

/// Map a key press to a game action. Returns `None` for keys the game ignores.
#[must_use]
pub fn action_for_key(key: KeyEvent) -> Option<UserAction> {
    // Only process Press events, ignore Release and Repeat to avoid double input
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c' | 'C') => Some(UserAction::Exit),
            _ => None,
        };
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        return None;
    }

    match key.code {
        KeyCode::Char(c) if c.is_ascii_alphabetic() => {
            Some(UserAction::Edit(EditAction::Append(c)))
        }
        KeyCode::Backspace => Some(UserAction::Edit(EditAction::Backspace)),
        KeyCode::Enter => Some(UserAction::Submit),
        KeyCode::Esc => Some(UserAction::Exit),
        _ => None,
    }
}

/// Map any terminal event to a game action.
#[must_use]
pub fn action_for_event(event: Event) -> Option<UserAction> {
    match event {
        Event::Key(key) => action_for_key(key),
        Event::Paste(text) => Some(UserAction::Edit(EditAction::SetRaw(text))),
        _ => None,
    }
}

/// Render the complete UI for `state`.
pub fn render_game(f: &mut Frame, state: &GameState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Title
            Constraint::Length(14), // Board
            Constraint::Length(5),  // Keyboard
            Constraint::Length(3),  // Message
            Constraint::Min(3),     // Instructions
        ])
        .split(f.area());

    render_title(f, chunks[0]);
    render_board(f, chunks[1], state);
    render_keyboard(f, chunks[2], state);
    render_message(f, chunks[3], state);
    render_instructions(f, chunks[4], state);
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new("WORDQUEST")
        .style(HEADER_STYLE)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn tiles<I>(letters: I) -> Line<'static>
where
    I: IntoIterator<Item = (char, Option<LetterColor>)>,
{
    let mut spans = Vec::new();
    for (letter, color) in letters {
        spans.push(Span::styled(
            format!(" {} ", letter.to_ascii_uppercase()),
            tile_style(color),
        ));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn render_board(f: &mut Frame, area: Rect, state: &GameState) {
    let block = Block::default()
        .title(format!(
            "Guesses ({}/{MAX_GUESSES})",
            state.history().len()
        ))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let history = state.history();
    for row in 0..MAX_GUESSES {
        let line = if let Some(record) = history.get(row) {
            tiles(record.letters().map(|(c, color)| (c, Some(color))))
        } else if row == history.len() && !state.is_game_over() {
            let mut input = state.input().chars();
            tiles((0..WORD_LENGTH).map(|_| (input.next().unwrap_or(' '), None)))
        } else {
            tiles([(' ', None); WORD_LENGTH])
        };
        render_line(f, inner, row, line);
    }
}

#[allow(clippy::cast_possible_truncation)]
fn render_line(f: &mut Frame, area: Rect, row: usize, line: Line<'static>) {
    let y = area.y + (row as u16 * ROW_SPACING);
    if y >= area.y + area.height {
        return;
    }
    f.render_widget(
        Paragraph::new(line).alignment(Alignment::Center),
        Rect {
            x: area.x,
            y,
            width: area.width,
            height: 1,
        },
    );
}

fn render_keyboard(f: &mut Frame, area: Rect, state: &GameState) {
    let mut lines = Vec::new();
    for (i, row) in KEYBOARD_ROWS.iter().enumerate() {
        let mut spans = Vec::new();
        if i == KEYBOARD_ROWS.len() - 1 {
            spans.push(Span::styled(" ENTER ", tile_style(None)));
            spans.push(Span::raw(" "));
        }
        for c in row.chars() {
            spans.push(Span::styled(
                format!(" {} ", c.to_ascii_uppercase()),
                tile_style(state.key_color(c)),
            ));
            spans.push(Span::raw(" "));
        }
        if i == KEYBOARD_ROWS.len() - 1 {
            spans.push(Span::styled(" ⌫ ", tile_style(None)));
        }
        lines.push(Line::from(spans));
    }

    let keyboard = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().title("Keyboard").borders(Borders::ALL));
    f.render_widget(keyboard, area);
}

fn render_message(f: &mut Frame, area: Rect, state: &GameState) {
    let style = match state.message() {
        m if m.is_empty() => MESSAGE_STYLE,
        _ if !state.is_game_over() => ERROR_STYLE,
        _ if state.status() == GameStatus::Won => SUCCESS_STYLE,
        _ => MESSAGE_STYLE,
    };
    let paragraph = Paragraph::new(state.message())
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_instructions(f: &mut Frame, area: Rect, state: &GameState) {
    let text = if state.is_game_over() {
        "Press any key to exit"
    } else {
        "Type your 5-letter guess | ENTER: Submit | BACKSPACE: Delete | ESC: Quit"
    };
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

/// Main TUI interface component.
///
/// Owns the terminal for its lifetime and restores it on drop.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: alternate screen, bracketed paste, cursor hidden");
        Ok(Self { terminal })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            DisableBracketedPaste,
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self, state: &GameState) -> Result<(), io::Error> {
        self.terminal.draw(|f| render_game(f, state))?;
        Ok(())
    }

    /// Log and handle draw errors appropriately
    fn draw_or_log(&mut self, state: &GameState) {
        if let Err(e) = self.draw(state) {
            log::warn!("Draw error: {e}");
        }
    }

    fn handle_input(&mut self) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }
        let event = event::read()?;
        debug_log!("handle_input() - Event received: {:?}", event);
        Ok(action_for_event(event))
    }

    fn wait_for_key(&mut self) -> Result<(), io::Error> {
        loop {
            if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                return Ok(());
            }
        }
    }
}

impl GameInterface for TuiInterface {
    fn display_welcome(&mut self, state: &GameState, word_count: usize) {
        info_log!("display_welcome() - {} words loaded", word_count);
        self.draw_or_log(state);
    }

    fn read_action(&mut self, state: &GameState) -> Option<UserAction> {
        if self.draw(state).is_err() {
            info_log!("read_action() - Draw failed, returning Exit");
            return Some(UserAction::Exit);
        }
        match self.handle_input() {
            Ok(action) => action,
            Err(e) => {
                log::warn!("Error handling input: {e}");
                Some(UserAction::Exit)
            }
        }
    }

    fn display_state(&mut self, state: &GameState) {
        self.draw_or_log(state);
    }

    fn display_game_over(&mut self, state: &GameState) {
        self.draw_or_log(state);
        if let Err(e) = self.wait_for_key() {
            log::warn!("Error waiting for key: {e}");
        }
    }

    fn display_exit_message(&mut self) {
        info_log!("display_exit_message() - Exiting");
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::{GameSession, INVALID_GUESS_MESSAGE, WIN_MESSAGE};
    use crate::wordbank::load_wordbank_from_str;
    use crossterm::event::KeyEventState;
    use ratatui::backend::TestBackend;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_letter_keys_append() {
        assert_eq!(
            action_for_key(press(KeyCode::Char('a'))),
            Some(UserAction::Edit(EditAction::Append('a')))
        );
        assert_eq!(
            action_for_key(KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(UserAction::Edit(EditAction::Append('A')))
        );
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(
            action_for_key(press(KeyCode::Backspace)),
            Some(UserAction::Edit(EditAction::Backspace))
        );
        assert_eq!(action_for_key(press(KeyCode::Enter)), Some(UserAction::Submit));
        assert_eq!(action_for_key(press(KeyCode::Esc)), Some(UserAction::Exit));
        assert_eq!(
            action_for_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(UserAction::Exit)
        );
    }

    #[test]
    fn test_ignored_keys() {
        assert_eq!(action_for_key(press(KeyCode::Char('1'))), None);
        assert_eq!(action_for_key(press(KeyCode::Char(' '))), None);
        assert_eq!(action_for_key(press(KeyCode::Char('\u{FFFD}'))), None);
        assert_eq!(action_for_key(press(KeyCode::Tab)), None);
        assert_eq!(
            action_for_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::ALT)),
            None
        );
        assert_eq!(
            action_for_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn test_release_events_ignored() {
        let release = KeyEvent::new_with_kind_and_state(
            KeyCode::Char('a'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        assert_eq!(action_for_key(release), None);
    }

    #[test]
    fn test_paste_sets_raw_input() {
        assert_eq!(
            action_for_event(Event::Paste("Crane".to_string())),
            Some(UserAction::Edit(EditAction::SetRaw("Crane".to_string())))
        );
        assert_eq!(action_for_event(Event::Resize(80, 24)), None);
        assert_eq!(action_for_event(Event::FocusLost), None);
    }

    fn rendered_text(state: &GameState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| render_game(f, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_render_fresh_game() {
        let bank = load_wordbank_from_str("crane\nslate").unwrap();
        let session = GameSession::with_target(&bank, "crane").unwrap();
        let text = rendered_text(session.state());
        assert!(text.contains("WORDQUEST"));
        assert!(text.contains("Guesses (0/6)"));
        assert!(text.contains("ENTER"));
        assert!(text.contains("ESC: Quit"));
    }

    #[test]
    fn test_render_shows_input_and_error() {
        let bank = load_wordbank_from_str("crane\nslate").unwrap();
        let mut session = GameSession::with_target(&bank, "crane").unwrap();
        session.edit_input(EditAction::SetRaw("zz".to_string()));
        session.submit_guess();
        let text = rendered_text(session.state());
        assert!(text.contains("Z   Z"));
        assert!(text.contains(INVALID_GUESS_MESSAGE));
    }

    #[test]
    fn test_render_game_over() {
        let bank = load_wordbank_from_str("crane\nslate").unwrap();
        let mut session = GameSession::with_target(&bank, "crane").unwrap();
        session.edit_input(EditAction::SetRaw("crane".to_string()));
        session.submit_guess();
        let text = rendered_text(session.state());
        assert!(text.contains("Guesses (1/6)"));
        assert!(text.contains(WIN_MESSAGE));
        assert!(text.contains("Press any key to exit"));
    }

    #[test]
    fn test_tile_styles_differ_by_color() {
        let styles = [
            tile_style(Some(LetterColor::Green)),
            tile_style(Some(LetterColor::Yellow)),
            tile_style(Some(LetterColor::Gray)),
            tile_style(None),
        ];
        for (i, a) in styles.iter().enumerate() {
            for b in &styles[i + 1..] {
                assert_ne!(a.bg, b.bg);
            }
        }
    }
}
