use crate::game_state::{GameState, GuessOutcome};
use crate::{debug_log, info_log};

/// Something the player asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Guess(char),
    Exit,
}

/// How a call to [`game_loop`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Won,
    Lost,
    /// The player left before the game was over.
    Quit,
}

/// Trait abstracting the front end of a game.
///
/// Implemented by the line-oriented CLI and by the TUI; the game loop only
/// ever talks to the player through it.
pub trait GameInterface {
    /// Show the current board: revealed word, guesses left, letters left.
    fn display_board(&mut self, game: &GameState);

    /// Read the next action. `None` means the input was not usable and the
    /// player should be asked again.
    fn read_guess(&mut self, game: &GameState) -> Option<UserAction>;

    fn display_guess_result(&mut self, letter: char, outcome: GuessOutcome);

    fn display_already_guessed(&mut self, letter: char);

    /// Called once when the game ends, with the word revealed.
    fn display_game_over(&mut self, game: &GameState);

    fn display_exit_message(&mut self);
}

/// Drive `game` until it is over or the player quits.
///
/// Letters that are no longer available are refused here rather than passed
/// to [`GameState::handle_guess`], which would count them again.
pub fn game_loop<I: GameInterface + ?Sized>(game: &mut GameState, interface: &mut I) -> SessionEnd {
    info_log!(
        "Starting game loop: {} letters, {} guesses remaining",
        game.word().len(),
        game.guesses_remaining()
    );

    while !game.is_game_over() {
        interface.display_board(game);

        let letter = match interface.read_guess(game) {
            Some(UserAction::Guess(letter)) => letter.to_ascii_uppercase(),
            Some(UserAction::Exit) => {
                info_log!("Player quit with {} guesses remaining", game.guesses_remaining());
                interface.display_exit_message();
                return SessionEnd::Quit;
            }
            None => continue,
        };

        if !game.is_available(letter) {
            debug_log!("Refusing unavailable letter {letter}");
            interface.display_already_guessed(letter);
            continue;
        }

        let outcome = game.handle_guess(letter);
        interface.display_guess_result(letter, outcome);
    }

    interface.display_game_over(game);
    if game.is_won() {
        info_log!("Game won with {} incorrect guesses", game.guesses_taken());
        SessionEnd::Won
    } else {
        info_log!("Game lost, the word was {}", game.word());
        SessionEnd::Lost
    }
}
