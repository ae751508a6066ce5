use crate::store::SessionStore;

/// Cursor over the session's cards with a flip state.
///
/// Points: +1 when a card is flipped to its answer, and +1 when leaving a
/// card that is still showing its answer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlashcardDeck {
    pub current_index: usize,
    pub is_flipped: bool,
}

impl FlashcardDeck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flip(&mut self, store: &SessionStore) {
        if !self.is_flipped {
            store.award_point();
        }
        self.is_flipped = !self.is_flipped;
    }

    pub fn next(&mut self, store: &SessionStore, total: usize) -> bool {
        if self.current_index < total.saturating_sub(1) {
            self.leave_card(store);
            self.current_index += 1;
            true
        } else {
            false
        }
    }

    pub fn previous(&mut self, store: &SessionStore) -> bool {
        if self.current_index > 0 {
            self.leave_card(store);
            self.current_index -= 1;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.current_index = 0;
        self.is_flipped = false;
    }

    fn leave_card(&mut self, store: &SessionStore) {
        if self.is_flipped {
            store.award_point();
        }
        self.is_flipped = false;
    }
}
