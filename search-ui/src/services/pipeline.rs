use crate::models::query::{LimitOption, QueryState, SearchField};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::time::Instant;

/// Lets a value through only when it differs from the previous one.
#[derive(Debug, Default)]
pub struct Distinct<T> {
    last: Option<T>,
}

impl<T: PartialEq + Clone> Distinct<T> {
    pub fn new() -> Self {
        Distinct { last: None }
    }

    pub fn seeded(value: T) -> Self {
        Distinct { last: Some(value) }
    }

    pub fn accept(&mut self, value: &T) -> bool {
        if self.last.as_ref() == Some(value) {
            return false;
        }
        self.last = Some(value.clone());
        true
    }
}

/// Holds the latest value until `window` passes without a newer one.
#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Debouncer {
            window,
            pending: None,
        }
    }

    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.window));
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at)
    }

    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        match self.deadline() {
            Some(at) if at <= now => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }
}

/// Latest value of each input; complete once every input has produced one.
#[derive(Debug, Default)]
pub struct CombineLatest {
    limit: Option<LimitOption>,
    text: Option<String>,
    field: Option<SearchField>,
}

impl CombineLatest {
    pub fn set_limit(&mut self, limit: LimitOption) -> Option<QueryState> {
        self.limit = Some(limit);
        self.snapshot()
    }

    pub fn set_text(&mut self, text: String) -> Option<QueryState> {
        self.text = Some(text);
        self.snapshot()
    }

    pub fn set_field(&mut self, field: SearchField) -> Option<QueryState> {
        self.field = Some(field);
        self.snapshot()
    }

    pub fn snapshot(&self) -> Option<QueryState> {
        Some(QueryState {
            search_text: self.text.clone()?,
            limit: self.limit?,
            field: self.field?,
        })
    }
}

/// Tags outgoing requests so that only the newest response is applied.
/// Shared between the controller handle and its request tasks.
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: AtomicU64,
}

impl RequestSequence {
    pub fn next(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, tag: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == tag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_suppresses_repeats_only() {
        let mut gate = Distinct::new();

        assert!(gate.accept(&10));
        assert!(!gate.accept(&10));
        assert!(gate.accept(&30));
        assert!(gate.accept(&10));
    }

    #[test]
    fn test_seeded_distinct_suppresses_initial_value() {
        let mut gate = Distinct::seeded(String::new());

        assert!(!gate.accept(&String::new()));
        assert!(gate.accept(&"dune".to_string()));
        assert!(gate.accept(&String::new()));
    }

    #[test]
    fn test_debouncer_restarts_window_on_each_push() {
        let start = Instant::now();
        let mut debounce = Debouncer::new(Duration::from_millis(400));

        debounce.push("d", start);
        debounce.push("du", start + Duration::from_millis(300));
        assert_eq!(debounce.take_due(start + Duration::from_millis(500)), None);

        debounce.push("dune", start + Duration::from_millis(600));
        assert_eq!(
            debounce.deadline(),
            Some(start + Duration::from_millis(1000))
        );
        assert_eq!(
            debounce.take_due(start + Duration::from_millis(1000)),
            Some("dune")
        );
        assert_eq!(debounce.deadline(), None);
    }

    #[test]
    fn test_combine_waits_for_all_inputs() {
        let mut combine = CombineLatest::default();

        assert_eq!(combine.set_limit(LimitOption::Ten), None);
        assert_eq!(combine.set_field(SearchField::Title), None);

        let query = combine.set_text("dune".to_string()).unwrap();
        assert_eq!(query.search_text, "dune");
        assert_eq!(query.limit, LimitOption::Ten);
        assert_eq!(query.field, SearchField::Title);

        let query = combine.set_limit(LimitOption::Fifty).unwrap();
        assert_eq!(query.search_text, "dune");
        assert_eq!(query.limit, LimitOption::Fifty);
    }

    #[test]
    fn test_only_latest_request_is_current() {
        let seq = RequestSequence::default();
        let first = seq.next();
        let second = seq.next();

        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }
}
