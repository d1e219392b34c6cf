// Integration tests for spaceman
// These tests drive whole games through the public API and the CLI interface

use spaceman::cli::CliInterface;
use spaceman::*;
use std::io::Cursor;
use std::path::PathBuf;

fn play(game: &mut GameState, input: &str) -> SessionEnd {
    let mut interface = CliInterface::new(Cursor::new(input.to_string()));
    game_loop(game, &mut interface)
}

fn temp_save_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join("spaceman_integration_tests")
        .join(name)
}

#[test]
fn test_full_game_won_through_cli() {
    let mut game = GameState::new("rocket").unwrap();
    let end = play(&mut game, "r\no\nc\nk\ne\nt\n");

    assert_eq!(end, SessionEnd::Won);
    assert_eq!(game.masked_word(), "ROCKET");
    assert_eq!(game.guesses_taken(), 0);
    assert_eq!(game.letters_guessed(), ['R', 'O', 'C', 'K', 'E', 'T']);
    assert_eq!(game.letters_available().len(), 20);
}

#[test]
fn test_full_game_lost_through_cli() {
    let mut game = GameState::builder()
        .word("ORBIT")
        .guesses_allowed(3)
        .build()
        .unwrap();
    // The fourth line is never read because the game ends first
    let end = play(&mut game, "x\ny\nz\no\n");

    assert_eq!(end, SessionEnd::Lost);
    assert!(game.is_lost());
    assert_eq!(game.masked_word(), "_____");
    assert!(game.is_available('O'));
}

#[test]
fn test_invalid_and_repeated_input_does_not_cost_guesses() {
    let mut game = GameState::new("CAT").unwrap();
    let end = play(&mut game, "x\nX\n42\nab\n\nc\na\nt\n");

    assert_eq!(end, SessionEnd::Won);
    assert_eq!(game.guesses_taken(), 1);
    assert_eq!(game.letters_guessed(), ['X', 'C', 'A', 'T']);
}

#[test]
fn test_end_of_input_quits() {
    let mut game = GameState::new("CAT").unwrap();
    let end = play(&mut game, "c\n");

    assert_eq!(end, SessionEnd::Quit);
    assert!(!game.is_game_over());
    assert_eq!(game.masked_word(), "C__");
}

#[test]
fn test_resumed_game_continues_where_it_left_off() {
    // TESTWORD with S, W, O, R found and A, C missed
    let mut game = GameState::builder()
        .word("TESTWORD")
        .guessed_word_state([None, None, Some('S'), None, Some('W'), Some('O'), Some('R'), None])
        .letters_guessed(['S', 'A', 'W', 'O', 'R', 'C'])
        .letters_available("BDEFGHIJKLMNPQTUVXYZ".chars())
        .guesses_allowed(5)
        .guesses_taken(2)
        .build()
        .unwrap();

    let end = play(&mut game, "s\nt\ne\nd\n");

    assert_eq!(end, SessionEnd::Won);
    assert_eq!(game.guesses_taken(), 2);
    assert_eq!(
        game.letters_guessed(),
        ['S', 'A', 'W', 'O', 'R', 'C', 'T', 'E', 'D']
    );
}

#[test]
fn test_quit_save_resume_cycle() {
    let path = temp_save_path("quit_save_resume.json");
    let _ = clear_saved_game(&path);

    let mut game = GameState::new("GALAXY").unwrap();
    assert_eq!(play(&mut game, "a\nq\nexit\n"), SessionEnd::Quit);
    save_game(&path, &game).unwrap();

    let saved = load_game(&path).unwrap().unwrap();
    assert_eq!(saved.game, game);
    let mut resumed = saved.game;
    assert_eq!(resumed.masked_word(), "_A_A__");
    assert_eq!(resumed.guesses_taken(), 1);

    assert_eq!(play(&mut resumed, "g\nl\nx\ny\n"), SessionEnd::Won);
    clear_saved_game(&path).unwrap();
    assert!(load_game(&path).unwrap().is_none());
}

#[test]
fn test_hand_edited_save_is_validated() {
    let path = temp_save_path("hand_edited.json");
    let game = GameState::new("COMET").unwrap();
    save_game(&path, &game).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    std::fs::write(&path, contents.replace("COMET", "C0MET")).unwrap();
    assert!(matches!(load_game(&path), Err(SaveError::Json(_))));

    clear_saved_game(&path).unwrap();
}

#[test]
fn test_validation_errors_through_public_api() {
    assert_eq!(
        GameStateBuilder::new().build().unwrap_err(),
        GameError::MissingField("word")
    );
    assert!(matches!(
        GameState::new("AA").unwrap_err(),
        GameError::InvalidWord { .. }
    ));
    assert!(matches!(
        GameState::new("A1B").unwrap_err(),
        GameError::InvalidWord { .. }
    ));
}

#[test]
fn test_error_messages_are_readable() {
    let err = GameState::new("A1B").unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid word \"A1B\": must contain only letters A-Z"
    );
    assert_eq!(
        GameError::MissingField("word").to_string(),
        "missing required field `word`"
    );
}
