//! Year selection state for the public budget and population pages.
//!
//! The caller performs the fetch described by a [`FetchRequest`] and
//! reports back with [`YearView::loaded`] or [`YearView::failed`]. While a
//! fetch runs the previous dataset stays visible and is marked stale.

/// A fetch the caller should perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    /// Requested year; `None` means the most recent one.
    pub year: Option<i32>,
    /// Sequence number used to drop superseded responses.
    pub ticket: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FetchState {
    Idle,
    Fetching(FetchRequest),
    Failed {
        year: Option<i32>,
        message: String,
    },
}

/// Displayed dataset plus the state of the current fetch.
#[derive(Debug, Clone)]
pub struct YearView<T> {
    shown: Option<(i32, T)>,
    state: FetchState,
    next_ticket: u64,
}

impl<T> Default for YearView<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> YearView<T> {
    /// Nothing shown, nothing in flight.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            shown: None,
            state: FetchState::Idle,
            next_ticket: 0,
        }
    }

    fn start(&mut self, year: Option<i32>) -> FetchRequest {
        let request = FetchRequest {
            year,
            ticket: self.next_ticket,
        };
        self.next_ticket += 1;
        self.state = FetchState::Fetching(request);
        request
    }

    /// Initial load of the latest year.
    pub fn load_latest(&mut self) -> Option<FetchRequest> {
        if self.is_fetching() {
            return None;
        }
        Some(self.start(None))
    }

    /// Switches to `year`.
    ///
    /// Returns `None` when that year is already displayed or already being
    /// fetched. Otherwise the new request supersedes any fetch in flight.
    /// Going back to the displayed year cancels the fetch in flight, so its
    /// response is dropped as superseded.
    pub fn select_year(&mut self, year: i32) -> Option<FetchRequest> {
        if let FetchState::Fetching(current) = self.state {
            if current.year == Some(year) {
                return None;
            }
        }
        if self.displayed_year() == Some(year) {
            if self.is_fetching() {
                self.state = FetchState::Idle;
            }
            return None;
        }
        Some(self.start(Some(year)))
    }

    /// Stores the response to `request`, replacing the displayed dataset.
    ///
    /// Returns `false` and changes nothing for a superseded request.
    pub fn loaded(&mut self, request: FetchRequest, year: i32, data: T) -> bool {
        if self.state != FetchState::Fetching(request) {
            return false;
        }
        self.shown = Some((year, data));
        self.state = FetchState::Idle;
        true
    }

    /// Records a failed fetch; the displayed dataset is kept.
    pub fn failed(&mut self, request: FetchRequest, message: impl Into<String>) -> bool {
        if self.state != FetchState::Fetching(request) {
            return false;
        }
        self.state = FetchState::Failed {
            year: request.year,
            message: message.into(),
        };
        true
    }

    /// Repeats the failed fetch. Only offered after a failure.
    pub fn retry(&mut self) -> Option<FetchRequest> {
        match self.state {
            FetchState::Failed { year, .. } => Some(self.start(year)),
            _ => None,
        }
    }

    /// Year and data on screen.
    #[must_use]
    pub fn displayed(&self) -> Option<(i32, &T)> {
        self.shown.as_ref().map(|(year, data)| (*year, data))
    }

    /// Year on screen.
    #[must_use]
    pub fn displayed_year(&self) -> Option<i32> {
        self.shown.as_ref().map(|(year, _)| *year)
    }

    /// A fetch is in flight.
    #[must_use]
    pub const fn is_fetching(&self) -> bool {
        matches!(self.state, FetchState::Fetching(_))
    }

    /// Displayed data is about to be replaced and should be dimmed.
    #[must_use]
    pub const fn is_stale(&self) -> bool {
        self.shown.is_some() && self.is_fetching()
    }

    /// Message of the last failure, until the next fetch starts.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            FetchState::Failed { message, .. } => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded_view(year: i32) -> YearView<&'static str> {
        let mut view = YearView::new();
        let request = view.load_latest().unwrap();
        assert!(view.loaded(request, year, "data"));
        view
    }

    #[test]
    fn test_initial_load_fetches_latest() {
        let mut view: YearView<u32> = YearView::new();
        let request = view.load_latest().unwrap();
        assert_eq!(request.year, None);
        assert!(view.is_fetching());
        assert!(!view.is_stale());
        assert!(view.load_latest().is_none());

        assert!(view.loaded(request, 2025, 7));
        assert_eq!(view.displayed(), Some((2025, &7)));
    }

    #[test]
    fn test_selecting_displayed_year_does_not_fetch() {
        let mut view = loaded_view(2025);
        assert_eq!(view.select_year(2025), None);
        assert!(!view.is_fetching());
    }

    #[test]
    fn test_selecting_other_year_fetches_once_and_replaces() {
        let mut view = loaded_view(2025);

        let request = view.select_year(2024).unwrap();
        assert_eq!(request.year, Some(2024));
        assert!(view.is_stale());
        assert_eq!(view.displayed(), Some((2025, &"data")));

        assert_eq!(view.select_year(2024), None);

        assert!(view.loaded(request, 2024, "lama"));
        assert_eq!(view.displayed(), Some((2024, &"lama")));
        assert!(!view.is_stale());
    }

    #[test]
    fn test_superseded_response_is_ignored() {
        let mut view = loaded_view(2025);
        let first = view.select_year(2023).unwrap();
        let second = view.select_year(2024).unwrap();

        assert!(!view.loaded(first, 2023, "2023"));
        assert_eq!(view.displayed_year(), Some(2025));

        assert!(view.loaded(second, 2024, "2024"));
        assert_eq!(view.displayed_year(), Some(2024));
    }

    #[test]
    fn test_returning_to_displayed_year_cancels_fetch_in_flight() {
        let mut view = loaded_view(2025);
        let pending = view.select_year(2024).unwrap();

        assert_eq!(view.select_year(2025), None);
        assert!(!view.is_fetching());
        assert!(!view.is_stale());

        assert!(!view.loaded(pending, 2024, "2024"));
        assert_eq!(view.displayed(), Some((2025, &"data")));
    }

    #[test]
    fn test_failure_keeps_data_and_offers_retry() {
        let mut view = loaded_view(2025);
        assert!(view.retry().is_none());

        let request = view.select_year(2024).unwrap();
        assert!(view.failed(request, "Gagal memuat data"));

        assert_eq!(view.displayed(), Some((2025, &"data")));
        assert_eq!(view.error(), Some("Gagal memuat data"));
        assert!(!view.is_fetching());

        let again = view.retry().unwrap();
        assert_eq!(again.year, Some(2024));
        assert_ne!(again.ticket, request.ticket);
        assert_eq!(view.error(), None);
    }
}
