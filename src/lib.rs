// Library interface for spaceman
// The game model is usable on its own; the other modules are the terminal front end

pub mod cli;
pub mod game_loop;
pub mod game_state;
pub mod logging;
pub mod save;
pub mod tui;

// Re-export commonly used items for easier testing
pub use game_loop::{GameInterface, SessionEnd, UserAction, game_loop};
pub use game_state::{GameError, GameState, GameStateBuilder, GuessOutcome};
pub use save::{SaveError, SavedGame, clear_saved_game, load_game, save_game};
