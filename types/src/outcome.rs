//! Caller-owned outcome slots for a read request.

/// Error and loading slots owned by the caller (typically a view-model).
///
/// The runner only mutates these slots; it never creates or drops them. The
/// state outlives any single request, so a stale error from a previous run is
/// cleared when the next run starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeState<E> {
    error: Option<E>,
    loading: bool,
}

impl<E> OutcomeState<E> {
    /// A view that is about to fetch: no error, loading.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            error: None,
            loading: true,
        }
    }

    #[must_use]
    pub const fn error(&self) -> Option<&E> {
        self.error.as_ref()
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn take_error(&mut self) -> Option<E> {
        self.error.take()
    }

    /// Mark the view as loading again ahead of a re-fetch.
    pub fn begin(&mut self) {
        self.loading = true;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn record_error(&mut self, error: E) {
        self.error = Some(error);
    }

    pub fn finish_loading(&mut self) {
        self.loading = false;
    }
}

impl<E> Default for OutcomeState<E> {
    /// Idle: no error, not loading.
    fn default() -> Self {
        Self {
            error: None,
            loading: false,
        }
    }
}
