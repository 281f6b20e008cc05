// Library interface for wordquest
// This allows integration tests to access internal modules

pub mod cli;
pub mod feedback;
pub mod game_state;
pub mod logging;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use feedback::{Feedback, LetterColor, compute_feedback};
pub use game_state::{
    EditAction, GameInterface, GameOutcome, GameSession, GameState, GameStatus, GuessError,
    GuessRecord, SubmitOutcome, UserAction, game_loop,
};
pub use wordbank::{Word, Wordbank, WordbankError, load_wordbank_from_file, load_wordbank_from_str};
