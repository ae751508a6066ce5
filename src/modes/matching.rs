use crate::models::StudyCard;
use crate::store::SessionStore;
use rand::seq::SliceRandom;
use rand::Rng;
use std::time::{Duration, Instant};

/// How long a mismatched pair stays face up before flipping back.
pub const MISMATCH_REVEAL: Duration = Duration::from_secs(1);

/// One tile on the board. A question and its answer share a `pair_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCard {
    pub text: String,
    pub pair_id: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Ignored,
    Selected,
    Matched,
    Mismatched,
}

#[derive(Debug, Clone)]
pub struct MatchingGame {
    pub cards: Vec<MatchCard>,
    pub selected: Vec<usize>,
    pub matched: Vec<usize>,
    revert_at: Option<Instant>,
}

impl MatchingGame {
    pub fn new<R: Rng + ?Sized>(questions: &[StudyCard], rng: &mut R) -> Self {
        Self {
            cards: deal(questions, rng),
            selected: Vec::new(),
            matched: Vec::new(),
            revert_at: None,
        }
    }

    pub fn reset<R: Rng + ?Sized>(&mut self, questions: &[StudyCard], rng: &mut R) {
        *self = Self::new(questions, rng);
    }

    pub fn is_matched(&self, index: usize) -> bool {
        self.cards
            .get(index)
            .is_some_and(|card| self.matched.contains(&card.pair_id))
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    pub fn is_complete(&self) -> bool {
        !self.cards.is_empty() && self.matched.len() * 2 == self.cards.len()
    }

    /// True while a mismatched pair is face up.
    pub fn is_revealing(&self) -> bool {
        self.revert_at.is_some()
    }

    pub fn click(&mut self, index: usize, store: &SessionStore, now: Instant) -> ClickOutcome {
        if index >= self.cards.len()
            || self.is_matched(index)
            || self.is_selected(index)
            || self.selected.len() == 2
        {
            return ClickOutcome::Ignored;
        }

        self.selected.push(index);
        if self.selected.len() < 2 {
            return ClickOutcome::Selected;
        }

        let first = self.cards[self.selected[0]].pair_id;
        let second = self.cards[self.selected[1]].pair_id;
        if first == second {
            self.matched.push(first);
            self.selected.clear();
            store.award_point();
            ClickOutcome::Matched
        } else {
            self.revert_at = Some(now + MISMATCH_REVEAL);
            ClickOutcome::Mismatched
        }
    }

    /// Flip a mismatched pair back once its reveal time is over.
    /// Returns true when the board changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.revert_at {
            Some(deadline) if now >= deadline => {
                self.selected.clear();
                self.revert_at = None;
                true
            }
            _ => false,
        }
    }
}

fn deal<R: Rng + ?Sized>(questions: &[StudyCard], rng: &mut R) -> Vec<MatchCard> {
    let mut cards: Vec<MatchCard> = questions
        .iter()
        .enumerate()
        .flat_map(|(pair_id, q)| {
            [
                MatchCard {
                    text: q.question.clone(),
                    pair_id,
                },
                MatchCard {
                    text: q.answer.clone(),
                    pair_id,
                },
            ]
        })
        .collect();
    cards.shuffle(rng);
    cards
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cards() -> Vec<StudyCard> {
        vec![
            StudyCard::new("Capital of France?", "Paris"),
            StudyCard::new("Capital of Italy?", "Rome"),
            StudyCard::new("Capital of Spain?", "Madrid"),
            StudyCard::new("Capital of Japan?", "Tokyo"),
        ]
    }

    fn game() -> MatchingGame {
        MatchingGame::new(&cards(), &mut StdRng::seed_from_u64(17))
    }

    fn pair_of(game: &MatchingGame, pair_id: usize) -> (usize, usize) {
        let found: Vec<usize> = game
            .cards
            .iter()
            .enumerate()
            .filter(|(_, c)| c.pair_id == pair_id)
            .map(|(i, _)| i)
            .collect();
        (found[0], found[1])
    }

    fn mismatch_of(game: &MatchingGame) -> (usize, usize) {
        let first = 0;
        let second = game
            .cards
            .iter()
            .position(|c| c.pair_id != game.cards[first].pair_id)
            .unwrap();
        (first, second)
    }

    #[test]
    fn test_deal_has_two_cards_per_question() {
        let game = game();
        assert_eq!(game.cards.len(), 8);
        for pair_id in 0..4 {
            assert_eq!(game.cards.iter().filter(|c| c.pair_id == pair_id).count(), 2);
        }
        assert!(game.cards.iter().any(|c| c.text == "Paris"));
        assert!(game.cards.iter().any(|c| c.text == "Capital of Japan?"));
    }

    #[test]
    fn test_matching_pair_awards_one_point() {
        let store = SessionStore::new();
        let mut game = game();
        let (a, b) = pair_of(&game, 2);
        let now = Instant::now();

        assert_eq!(game.click(a, &store, now), ClickOutcome::Selected);
        assert_eq!(game.click(b, &store, now), ClickOutcome::Matched);

        assert!(game.is_matched(a));
        assert!(game.is_matched(b));
        assert!(game.selected.is_empty());
        assert_eq!(store.points(), 1);
    }

    #[test]
    fn test_mismatch_reverts_after_delay() {
        let store = SessionStore::new();
        let mut game = game();
        let (a, b) = mismatch_of(&game);
        let now = Instant::now();

        game.click(a, &store, now);
        assert_eq!(game.click(b, &store, now), ClickOutcome::Mismatched);
        assert!(game.is_selected(a) && game.is_selected(b));
        assert!(game.is_revealing());

        assert!(!game.tick(now + Duration::from_millis(500)));
        assert_eq!(game.selected.len(), 2);

        assert!(game.tick(now + MISMATCH_REVEAL));
        assert!(game.selected.is_empty());
        assert!(!game.is_matched(a));
        assert_eq!(store.points(), 0);
    }

    #[test]
    fn test_clicks_ignored_while_pair_revealed() {
        let store = SessionStore::new();
        let mut game = game();
        let (a, b) = mismatch_of(&game);
        let third = (0..game.cards.len()).find(|&i| i != a && i != b).unwrap();
        let now = Instant::now();

        game.click(a, &store, now);
        game.click(b, &store, now);
        assert_eq!(game.click(third, &store, now), ClickOutcome::Ignored);
    }

    #[test]
    fn test_same_card_twice_is_not_a_match() {
        let store = SessionStore::new();
        let mut game = game();
        let now = Instant::now();

        game.click(0, &store, now);
        assert_eq!(game.click(0, &store, now), ClickOutcome::Ignored);
        assert_eq!(store.points(), 0);
    }

    #[test]
    fn test_matched_cards_ignore_clicks() {
        let store = SessionStore::new();
        let mut game = game();
        let (a, b) = pair_of(&game, 0);
        let now = Instant::now();

        game.click(a, &store, now);
        game.click(b, &store, now);
        assert_eq!(game.click(a, &store, now), ClickOutcome::Ignored);
        assert_eq!(game.click(99, &store, now), ClickOutcome::Ignored);
        assert_eq!(store.points(), 1);
    }

    #[test]
    fn test_complete_and_reset() {
        let store = SessionStore::new();
        let mut game = game();
        let now = Instant::now();

        for pair_id in 0..4 {
            let (a, b) = pair_of(&game, pair_id);
            game.click(a, &store, now);
            game.click(b, &store, now);
        }
        assert!(game.is_complete());
        assert_eq!(store.points(), 4);

        game.reset(&cards(), &mut StdRng::seed_from_u64(3));
        assert!(game.matched.is_empty());
        assert!(!game.is_complete());
        assert_eq!(store.points(), 4);
    }

    #[test]
    fn test_empty_board_is_never_complete() {
        let game = MatchingGame::new(&[], &mut StdRng::seed_from_u64(0));
        assert!(!game.is_complete());
    }
}
