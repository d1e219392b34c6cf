use crate::debug_log;
use crate::game_loop::{GameInterface, UserAction};
use crate::game_state::{
    DEFAULT_GUESSES_ALLOWED, GameError, GameState, GameStateBuilder, GuessOutcome,
};
use crate::save::{self, SaveError};
use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;

/// Spaceman: guess the secret word one letter at a time
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Secret word for a new game (letters only, at least 3)
    #[arg(short = 'w', long = "word")]
    pub word: Option<String>,

    /// Number of incorrect guesses allowed
    #[arg(short = 'g', long = "guesses", default_value_t = DEFAULT_GUESSES_ALLOWED)]
    pub guesses_allowed: u32,

    /// Resume the saved game instead of starting a new one
    #[arg(short = 'r', long = "resume", conflicts_with = "word")]
    pub resume: bool,

    /// Where to keep the saved game (defaults to the platform data directory)
    #[arg(long = "save-file")]
    pub save_file: Option<PathBuf>,

    /// Never write a save file
    #[arg(long = "no-save", conflicts_with = "save_file")]
    pub no_save: bool,

    /// Use the full-screen terminal interface
    #[arg(long = "tui")]
    pub tui: bool,

    /// Append logs to this file instead of stderr
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

impl Cli {
    /// Build a fresh game from `--word` and `--guesses`.
    ///
    /// # Errors
    ///
    /// Fails with the game's validation error, including a missing word.
    pub fn new_game(&self) -> Result<GameState, GameError> {
        let mut builder = GameStateBuilder::new().guesses_allowed(self.guesses_allowed);
        if let Some(word) = &self.word {
            builder = builder.word(word.as_str());
        }
        builder.build()
    }

    /// The save location, or `None` when saving is disabled.
    ///
    /// # Errors
    ///
    /// Fails when no path was given and the platform has no data directory.
    pub fn save_path(&self) -> Result<Option<PathBuf>, SaveError> {
        if self.no_save {
            return Ok(None);
        }
        match &self.save_file {
            Some(path) => Ok(Some(path.clone())),
            None => save::default_save_path().map(Some),
        }
    }
}

// UI Input/Output functions

pub enum GuessInput {
    Valid(char),
    Invalid,
    Exit,
}

fn parse_guess(input: &str) -> GuessInput {
    let input = input.trim().to_uppercase();
    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => GuessInput::Valid(c),
        _ if input == "EXIT" || input == "QUIT" => GuessInput::Exit,
        _ => GuessInput::Invalid,
    }
}

fn format_letters(letters: &[char]) -> String {
    letters
        .iter()
        .map(char::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn read_guess<R: BufRead>(reader: &mut R) -> GuessInput {
    println!("\nEnter a letter (or 'exit' to quit):");
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) => return GuessInput::Exit,
        Ok(_) => {}
        Err(e) => {
            debug_log!("read_guess() - read error: {}", e);
            return GuessInput::Exit;
        }
    }

    match parse_guess(&input) {
        GuessInput::Invalid => {
            println!("Invalid guess. Please enter a single letter A-Z.");
            GuessInput::Invalid
        }
        other => other,
    }
}

pub fn display_board(game: &GameState) {
    let spaced: Vec<char> = game.masked_word().chars().collect();
    println!("\nWord: {}", format_letters(&spaced));
    println!(
        "Incorrect guesses: {}/{} ({} left)",
        game.guesses_taken(),
        game.guesses_allowed(),
        game.guesses_remaining()
    );
    println!("Available: {}", format_letters(game.letters_available()));
    if !game.letters_guessed().is_empty() {
        println!("Guessed: {}", format_letters(game.letters_guessed()));
    }
}

pub fn display_guess_result(letter: char, outcome: GuessOutcome) {
    match outcome {
        GuessOutcome::Correct { occurrences: 1 } => println!("Yes! There is one {letter}."),
        GuessOutcome::Correct { occurrences } => {
            println!("Yes! There are {occurrences} {letter}s.");
        }
        GuessOutcome::Incorrect => println!("Sorry, there is no {letter}."),
    }
}

pub fn display_already_guessed(letter: char) {
    println!("You already guessed {letter}. Pick another letter.");
}

pub fn display_game_over(game: &GameState) {
    if game.is_won() {
        println!(
            "\nYou guessed it: {} ({} incorrect guesses).",
            game.word(),
            game.guesses_taken()
        );
    } else {
        println!("\nOut of guesses! The word was {}.", game.word());
    }
}

pub fn display_exit_message() {
    println!("Exiting.");
}

/// CLI implementation of the GameInterface trait
/// This struct wraps a BufRead reader and implements the game interface for CLI interaction
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_board(&mut self, game: &GameState) {
        display_board(game);
    }

    fn read_guess(&mut self, _game: &GameState) -> Option<UserAction> {
        match read_guess(&mut self.reader) {
            GuessInput::Valid(letter) => Some(UserAction::Guess(letter)),
            GuessInput::Exit => Some(UserAction::Exit),
            GuessInput::Invalid => None,
        }
    }

    fn display_guess_result(&mut self, letter: char, outcome: GuessOutcome) {
        display_guess_result(letter, outcome);
    }

    fn display_already_guessed(&mut self, letter: char) {
        display_already_guessed(letter);
    }

    fn display_game_over(&mut self, game: &GameState) {
        display_game_over(game);
    }

    fn display_exit_message(&mut self) {
        display_exit_message();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("spaceman").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_cli_defaults() {
        let cli = cli(&["--word", "rocket"]);
        assert_eq!(cli.word.as_deref(), Some("rocket"));
        assert_eq!(cli.guesses_allowed, DEFAULT_GUESSES_ALLOWED);
        assert!(!cli.resume);
        assert!(!cli.tui);
        assert!(!cli.no_save);
        assert_eq!(cli.save_file, None);
    }

    #[test]
    fn test_parse_cli_all_flags() {
        let cli = cli(&[
            "-w", "orbit", "-g", "3", "--save-file", "/tmp/s.json", "--tui",
            "--log-file", "/tmp/s.log",
        ]);
        assert_eq!(cli.guesses_allowed, 3);
        assert!(!cli.resume);
        assert!(cli.tui);
        assert_eq!(cli.save_file, Some(PathBuf::from("/tmp/s.json")));
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/s.log")));
    }

    #[test]
    fn test_resume_conflicts_with_word() {
        assert!(cli(&["-r"]).resume);
        let result = Cli::try_parse_from(["spaceman", "--resume", "--word", "orbit"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_no_save_conflicts_with_save_file() {
        let result = Cli::try_parse_from(["spaceman", "--no-save", "--save-file", "x.json"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_new_game_from_cli() {
        let game = cli(&["--word", "rocket", "--guesses", "4"]).new_game().unwrap();
        assert_eq!(game.word(), "ROCKET");
        assert_eq!(game.guesses_allowed(), 4);
    }

    #[test]
    fn test_new_game_without_word_is_missing_field() {
        let err = cli(&[]).new_game().unwrap_err();
        assert_eq!(err, GameError::MissingField("word"));
    }

    #[test]
    fn test_new_game_with_bad_word() {
        let err = cli(&["--word", "r2d2"]).new_game().unwrap_err();
        assert!(matches!(err, GameError::InvalidWord { .. }));
    }

    #[test]
    fn test_save_path_disabled() {
        assert_eq!(cli(&["--no-save"]).save_path().unwrap(), None);
    }

    #[test]
    fn test_save_path_override() {
        let path = cli(&["--save-file", "game.json"]).save_path().unwrap();
        assert_eq!(path, Some(PathBuf::from("game.json")));
    }

    #[test]
    fn test_parse_guess() {
        assert!(matches!(parse_guess("a\n"), GuessInput::Valid('A')));
        assert!(matches!(parse_guess("  Q  "), GuessInput::Valid('Q')));
        assert!(matches!(parse_guess("exit"), GuessInput::Exit));
        assert!(matches!(parse_guess("Quit\n"), GuessInput::Exit));
        assert!(matches!(parse_guess("ab"), GuessInput::Invalid));
        assert!(matches!(parse_guess("7"), GuessInput::Invalid));
        assert!(matches!(parse_guess(""), GuessInput::Invalid));
        assert!(matches!(parse_guess("é"), GuessInput::Invalid));
    }

    #[test]
    fn test_read_guess_end_of_input_exits() {
        let mut reader = Cursor::new("");
        assert!(matches!(read_guess(&mut reader), GuessInput::Exit));
    }

    #[test]
    fn test_read_guess_sequence() {
        let mut reader = Cursor::new("x\n12\nexit\n");
        assert!(matches!(read_guess(&mut reader), GuessInput::Valid('X')));
        assert!(matches!(read_guess(&mut reader), GuessInput::Invalid));
        assert!(matches!(read_guess(&mut reader), GuessInput::Exit));
    }

    #[test]
    fn test_cli_interface_maps_input() {
        let game = GameState::new("CAT").unwrap();
        let mut interface = CliInterface::new(Cursor::new("c\nzz\nquit\n"));
        assert_eq!(interface.read_guess(&game), Some(UserAction::Guess('C')));
        assert_eq!(interface.read_guess(&game), None);
        assert_eq!(interface.read_guess(&game), Some(UserAction::Exit));
        assert_eq!(interface.read_guess(&game), Some(UserAction::Exit));
    }

    #[test]
    fn test_format_letters() {
        assert_eq!(format_letters(&['A', 'B', 'C']), "A B C");
        assert_eq!(format_letters(&[]), "");
    }
}
