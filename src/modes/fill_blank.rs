use crate::models::FillInBlankExercise;

/// Result of handing a synthesis response to the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    /// Response for a request this round no longer waits on.
    Stale,
    /// Request failed; the previous exercise is still shown.
    KeptPrevious,
    /// Request failed and there is nothing to show.
    Unavailable,
}

/// Player state for the fill-in-the-blank view.
///
/// Only one synthesis request is in flight at a time. Each request gets a
/// ticket and responses carrying any other ticket are dropped.
#[derive(Debug, Clone, Default)]
pub struct FillBlankRound {
    pub exercise: Option<FillInBlankExercise>,
    pub selected: Vec<String>,
    pub fixed: Vec<String>,
    pub last_error: Option<String>,
    pending: Option<u64>,
    next_ticket: u64,
}

impl FillBlankRound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Ticket for a new request, or `None` while one is outstanding.
    pub fn begin_request(&mut self) -> Option<u64> {
        if self.pending.is_some() {
            return None;
        }
        self.next_ticket += 1;
        self.pending = Some(self.next_ticket);
        Some(self.next_ticket)
    }

    pub fn apply_response(
        &mut self,
        ticket: u64,
        result: Result<FillInBlankExercise, String>,
    ) -> FetchOutcome {
        if self.pending != Some(ticket) {
            return FetchOutcome::Stale;
        }
        self.pending = None;

        match result {
            Ok(exercise) => {
                self.exercise = Some(exercise);
                self.selected.clear();
                self.fixed.clear();
                self.last_error = None;
                FetchOutcome::Applied
            }
            Err(error) => {
                self.last_error = Some(error);
                if self.exercise.is_some() {
                    FetchOutcome::KeptPrevious
                } else {
                    FetchOutcome::Unavailable
                }
            }
        }
    }

    /// Drop the exercise and forget any outstanding request.
    pub fn clear(&mut self) {
        let next_ticket = self.next_ticket;
        *self = Self {
            next_ticket,
            ..Self::default()
        };
    }

    pub fn click(&mut self, word: &str) {
        if self.fixed.iter().any(|w| w == word) {
            return;
        }

        if let Some(pos) = self.selected.iter().position(|w| w == word) {
            self.selected.remove(pos);
            return;
        }

        if self.selected.len() == 2 {
            self.selected.remove(0);
        }
        self.selected.push(word.to_string());

        if self.is_correct()
            && let Some(exercise) = &self.exercise
        {
            self.fixed = exercise
                .answer_words()
                .into_iter()
                .map(str::to_string)
                .collect();
        }
    }

    pub fn is_correct(&self) -> bool {
        let Some(exercise) = &self.exercise else {
            return false;
        };
        self.selected.len() == 2
            && exercise
                .answer_words()
                .iter()
                .all(|answer| self.selected.iter().any(|w| w == answer))
    }

    /// `Some(correct?)` once two cards are selected.
    pub fn feedback(&self) -> Option<bool> {
        (self.selected.len() == 2).then(|| self.is_correct())
    }
}
