pub mod fill_blank;
pub mod flashcards;
pub mod matching;

pub use fill_blank::{FetchOutcome, FillBlankRound};
pub use flashcards::FlashcardDeck;
pub use matching::{ClickOutcome, MatchCard, MatchingGame, MISMATCH_REVEAL};
