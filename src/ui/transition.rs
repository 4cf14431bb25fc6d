//! Fade transition bookkeeping.
//!
//! A fade is: remove `show`, wait the fade duration, render, add `show`.
//! Only the last requested fade may finish. Each [`FadeTransition::begin`]
//! hands out a [`FadeTicket`]; when the delay elapses the ticket is checked
//! with [`FadeTransition::finish`], which fails for tickets superseded by a
//! newer `begin` or by [`FadeTransition::cancel`].
//!
//! # Example
//!
//! ```
//! use vanillabeach::ui::FadeTransition;
//!
//! let mut fade = FadeTransition::default();
//! let first = fade.begin();
//! let second = fade.begin();
//! assert!(!fade.finish(first));
//! assert!(fade.finish(second));
//! ```

/// Proof that a fade was started. Only the newest ticket finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeTicket(u64);

#[derive(Debug, Default)]
pub struct FadeTransition {
    generation: u64,
    pending: bool,
}

impl FadeTransition {
    /// Starts a fade, superseding any pending one.
    pub fn begin(&mut self) -> FadeTicket {
        self.generation += 1;
        self.pending = true;
        FadeTicket(self.generation)
    }

    /// Completes the fade behind `ticket` if it is still the newest.
    ///
    /// Returns `false` for superseded or cancelled tickets, which must not
    /// render.
    pub fn finish(&mut self, ticket: FadeTicket) -> bool {
        if !self.pending || ticket.0 != self.generation {
            return false;
        }
        self.pending = false;
        true
    }

    /// Invalidates the pending fade, if any.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = false;
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_finishes_once() {
        let mut fade = FadeTransition::default();
        let ticket = fade.begin();
        assert!(fade.is_pending());
        assert!(fade.finish(ticket));
        assert!(!fade.finish(ticket));
        assert!(!fade.is_pending());
    }

    #[test]
    fn cancel_invalidates_pending_ticket() {
        let mut fade = FadeTransition::default();
        let ticket = fade.begin();
        fade.cancel();
        assert!(!fade.finish(ticket));

        let next = fade.begin();
        assert!(fade.finish(next));
    }
}
