//! Where a run reports its outcome.

use tenant_fetch_types::OutcomeState;
use tokio::sync::watch;

/// Caller-owned error and loading slots.
///
/// A run calls `clear_error` first, `record_error` at most once, and
/// `finish_loading` exactly once, always last.
pub trait OutcomeSink<E> {
    fn clear_error(&mut self);
    fn record_error(&mut self, error: E);
    fn finish_loading(&mut self);
}

impl<E> OutcomeSink<E> for OutcomeState<E> {
    fn clear_error(&mut self) {
        OutcomeState::clear_error(self);
    }

    fn record_error(&mut self, error: E) {
        OutcomeState::record_error(self, error);
    }

    fn finish_loading(&mut self) {
        OutcomeState::finish_loading(self);
    }
}

/// Reactive slots: every receiver observes each transition.
impl<E> OutcomeSink<E> for watch::Sender<OutcomeState<E>> {
    fn clear_error(&mut self) {
        // Only wake observers when there was something to clear.
        self.send_if_modified(|state| {
            let had_error = state.error().is_some();
            state.clear_error();
            had_error
        });
    }

    fn record_error(&mut self, error: E) {
        self.send_modify(|state| state.record_error(error));
    }

    fn finish_loading(&mut self) {
        self.send_modify(OutcomeState::finish_loading);
    }
}
