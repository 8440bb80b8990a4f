// Library interface for strands
// This allows integration tests to access internal modules

pub mod board;
pub mod cli;
pub mod dictionary;
pub mod game;
pub mod logging;
pub mod puzzle;
pub mod session;
pub mod step;
pub mod strand;
pub mod tui;

// Re-export commonly used items for easier testing
pub use board::{Board, BoardError, OutOfBounds};
pub use dictionary::{Dictionary, DictionaryIndex, load_dictionary, load_dictionary_from_str};
pub use game::{ActiveHint, Game, HintOutcome, SubmitOutcome};
pub use puzzle::{Answer, Puzzle, PuzzleLoadError, Tiling};
pub use session::{GameInterface, SessionEnd, UserAction, game_loop};
pub use step::{NoSuchStep, Pos, Step};
pub use strand::Strand;
