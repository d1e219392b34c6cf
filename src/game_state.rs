//! The spaceman game model.
//!
//! A [`GameState`] owns the secret word and everything derived from the
//! guesses made against it. The only transition is [`GameState::handle_guess`];
//! whether the game is over is always computed from the current fields.

use crate::{debug_log, info_log};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Letters a new game offers, in display order.
pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub const MIN_WORD_LENGTH: usize = 3;
pub const DEFAULT_GUESSES_ALLOWED: u32 = 6;

/// Placeholder shown for a slot of the word that has not been revealed.
pub const BLANK: char = '_';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("invalid word {word:?}: {reason}")]
    InvalidWord { word: String, reason: &'static str },
    #[error("inconsistent game state: {0}")]
    InvalidState(String),
}

/// What a single guess did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The letter occurs in the word; every occurrence is now revealed.
    Correct { occurrences: usize },
    Incorrect,
}

/// Fields for creating or resuming a game.
///
/// Everything except `word` is optional and falls back to the state of a
/// fresh game. Nothing is trusted until [`GameStateBuilder::build`] has
/// validated it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GameStateBuilder {
    word: Option<String>,
    guesses_allowed: Option<u32>,
    guesses_taken: Option<u32>,
    letters_guessed: Option<Vec<char>>,
    letters_available: Option<Vec<char>>,
    guessed_word_state: Option<Vec<Option<char>>>,
}

impl GameStateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn word(mut self, word: impl Into<String>) -> Self {
        self.word = Some(word.into());
        self
    }

    #[must_use]
    pub fn guesses_allowed(mut self, guesses_allowed: u32) -> Self {
        self.guesses_allowed = Some(guesses_allowed);
        self
    }

    #[must_use]
    pub fn guesses_taken(mut self, guesses_taken: u32) -> Self {
        self.guesses_taken = Some(guesses_taken);
        self
    }

    #[must_use]
    pub fn letters_guessed(mut self, letters: impl IntoIterator<Item = char>) -> Self {
        self.letters_guessed = Some(letters.into_iter().collect());
        self
    }

    #[must_use]
    pub fn letters_available(mut self, letters: impl IntoIterator<Item = char>) -> Self {
        self.letters_available = Some(letters.into_iter().collect());
        self
    }

    #[must_use]
    pub fn guessed_word_state(mut self, slots: impl IntoIterator<Item = Option<char>>) -> Self {
        self.guessed_word_state = Some(slots.into_iter().collect());
        self
    }

    /// Validate the fields and produce a playable game.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::MissingField`] without a word,
    /// [`GameError::InvalidWord`] for a word that is too short or not made of
    /// ASCII letters, and [`GameError::InvalidState`] when resumed fields do
    /// not fit the word.
    pub fn build(self) -> Result<GameState, GameError> {
        let raw_word = self.word.ok_or(GameError::MissingField("word"))?;
        let word = validate_word(&raw_word)?;

        // History keeps whatever handle_guess recorded, so only the case is normalized
        let letters_guessed: Vec<char> = self
            .letters_guessed
            .unwrap_or_default()
            .iter()
            .map(char::to_ascii_uppercase)
            .collect();
        let letters_available = normalize_letters(self.letters_available, "letters_available")?
            .unwrap_or_else(|| ALPHABET.chars().collect());

        let guessed_word_state = match self.guessed_word_state {
            Some(slots) => validate_slots(&word, slots)?,
            None => vec![None; word.len()],
        };

        let game = GameState {
            word,
            guesses_allowed: self.guesses_allowed.unwrap_or(DEFAULT_GUESSES_ALLOWED),
            // Not capped by guesses_allowed: finished games must stay loadable
            guesses_taken: self.guesses_taken.unwrap_or(0),
            letters_guessed,
            letters_available,
            guessed_word_state,
        };
        info_log!(
            "Built game: {} letters, {}/{} incorrect guesses used",
            game.word.len(),
            game.guesses_taken,
            game.guesses_allowed
        );
        Ok(game)
    }
}

fn validate_word(word: &str) -> Result<String, GameError> {
    if word.chars().count() < MIN_WORD_LENGTH {
        return Err(GameError::InvalidWord {
            word: word.to_string(),
            reason: "must be at least 3 letters long",
        });
    }
    if !word.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(GameError::InvalidWord {
            word: word.to_string(),
            reason: "must contain only letters A-Z",
        });
    }
    Ok(word.to_ascii_uppercase())
}

fn normalize_letters(
    letters: Option<Vec<char>>,
    field: &str,
) -> Result<Option<Vec<char>>, GameError> {
    let Some(letters) = letters else {
        return Ok(None);
    };
    if let Some(bad) = letters.iter().find(|c| !c.is_ascii_alphabetic()) {
        return Err(GameError::InvalidState(format!(
            "{field} contains non-letter {bad:?}"
        )));
    }
    Ok(Some(letters.iter().map(char::to_ascii_uppercase).collect()))
}

fn validate_slots(word: &str, slots: Vec<Option<char>>) -> Result<Vec<Option<char>>, GameError> {
    if slots.len() != word.len() {
        return Err(GameError::InvalidState(format!(
            "guessed_word_state has {} slots but the word has {} letters",
            slots.len(),
            word.len()
        )));
    }
    let slots: Vec<Option<char>> = slots
        .into_iter()
        .map(|slot| slot.map(|c| c.to_ascii_uppercase()))
        .collect();
    for (i, (slot, actual)) in slots.iter().zip(word.chars()).enumerate() {
        if let Some(revealed) = slot
            && *revealed != actual
        {
            return Err(GameError::InvalidState(format!(
                "slot {i} reveals {revealed:?} but the word has {actual:?} there"
            )));
        }
    }
    Ok(slots)
}

/// A single game of spaceman.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GameStateBuilder")]
pub struct GameState {
    word: String,
    guesses_allowed: u32,
    guesses_taken: u32,
    letters_guessed: Vec<char>,
    letters_available: Vec<char>,
    guessed_word_state: Vec<Option<char>>,
}

impl TryFrom<GameStateBuilder> for GameState {
    type Error = GameError;

    fn try_from(builder: GameStateBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

impl GameState {
    /// Start a fresh game with the default allowance.
    ///
    /// # Errors
    ///
    /// See [`GameStateBuilder::build`].
    pub fn new(word: &str) -> Result<Self, GameError> {
        GameStateBuilder::new().word(word).build()
    }

    pub fn builder() -> GameStateBuilder {
        GameStateBuilder::new()
    }

    /// Apply one guessed letter.
    ///
    /// The letter is recorded, removed from the available letters and either
    /// revealed in every slot it occupies or counted as an incorrect guess.
    /// Repeated letters and guesses after the game has ended are not
    /// rejected; front ends are expected to only offer available letters.
    pub fn handle_guess(&mut self, letter: char) -> GuessOutcome {
        let letter = letter.to_ascii_uppercase();
        self.letters_guessed.push(letter);
        self.letters_available.retain(|&c| c != letter);

        let mut occurrences = 0;
        for (slot, actual) in self.guessed_word_state.iter_mut().zip(self.word.chars()) {
            if actual == letter {
                *slot = Some(letter);
                occurrences += 1;
            }
        }

        let outcome = if occurrences > 0 {
            GuessOutcome::Correct { occurrences }
        } else {
            self.guesses_taken = self.guesses_taken.saturating_add(1);
            GuessOutcome::Incorrect
        };
        debug_log!(
            "Guess {letter}: {outcome:?}, state {}, {}/{} incorrect",
            self.masked_word(),
            self.guesses_taken,
            self.guesses_allowed
        );
        outcome
    }

    /// True once the allowance is used up or every slot is revealed.
    pub fn is_game_over(&self) -> bool {
        self.guesses_taken >= self.guesses_allowed || self.is_won()
    }

    pub fn is_won(&self) -> bool {
        self.guessed_word_state.iter().all(Option::is_some)
    }

    pub fn is_lost(&self) -> bool {
        !self.is_won() && self.guesses_taken >= self.guesses_allowed
    }

    pub fn guesses_remaining(&self) -> u32 {
        self.guesses_allowed.saturating_sub(self.guesses_taken)
    }

    /// The word as the player currently sees it, e.g. `T_ST____`.
    pub fn masked_word(&self) -> String {
        self.guessed_word_state
            .iter()
            .map(|slot| slot.unwrap_or(BLANK))
            .collect()
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn guesses_allowed(&self) -> u32 {
        self.guesses_allowed
    }

    pub fn guesses_taken(&self) -> u32 {
        self.guesses_taken
    }

    pub fn letters_guessed(&self) -> &[char] {
        &self.letters_guessed
    }

    pub fn letters_available(&self) -> &[char] {
        &self.letters_available
    }

    pub fn guessed_word_state(&self) -> &[Option<char>] {
        &self.guessed_word_state
    }

    /// Whether `letter` can still be offered to the player.
    pub fn is_available(&self, letter: char) -> bool {
        self.letters_available.contains(&letter.to_ascii_uppercase())
    }
}
