/// Which sentences are highlighted, by index into the current page's list
///
/// Indices only: the sentences themselves are looked up on demand, so a page
/// change can never leave a dangling reference behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighlightState {
    hovered: Option<usize>,
    locked: Option<usize>,
}

/// Keyboard movement of the locked sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentenceStep {
    /// Down arrow
    Forward,
    /// Up arrow
    Backward,
}

impl HighlightState {
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn locked(&self) -> Option<usize> {
        self.locked
    }

    pub fn is_idle(&self) -> bool {
        self.hovered.is_none() && self.locked.is_none()
    }

    /// Back to idle
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Pointer moved over `sentence` (or over nothing). Returns true if a redraw is needed.
    pub fn hover(&mut self, sentence: Option<usize>) -> bool {
        if self.hovered == sentence {
            return false;
        }
        self.hovered = sentence;
        true
    }

    /// Pointer pressed. Only a hit replaces the lock. Returns true if a redraw is needed.
    pub fn press(&mut self, sentence: Option<usize>) -> bool {
        match sentence {
            Some(index) => {
                self.locked = Some(index);
                true
            }
            None => false,
        }
    }

    /// Move the lock one sentence, clamped to `0..count`, no wraparound
    ///
    /// With nothing locked, forward locks the first sentence and backward the last.
    /// Returns the locked index, or `None` when there are no sentences.
    pub fn step_lock(&mut self, step: SentenceStep, count: usize) -> Option<usize> {
        let last = count.checked_sub(1)?;
        let next = match (self.locked, step) {
            (None, SentenceStep::Forward) => 0,
            (None, SentenceStep::Backward) => last,
            (Some(index), SentenceStep::Forward) => (index + 1).min(last),
            (Some(index), SentenceStep::Backward) => index.saturating_sub(1).min(last),
        };
        self.locked = Some(next);
        Some(next)
    }

    /// Sentences to draw, in paint order: the lock first, then the hover if it differs
    pub fn layers(&self) -> (Option<usize>, Option<usize>) {
        let hovered = self.hovered.filter(|h| Some(*h) != self.locked);
        (self.locked, hovered)
    }
}
