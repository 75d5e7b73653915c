//! Prefetching record cache.
//!
//! Wraps a forward-only [`RecordSource`] and serves arbitrary-offset slices
//! of it. Every fetch pulls two pages ahead of the requested window so that
//! immediate re-scrolls are served from memory. Features:
//! - Monotonic store: a record's position never changes once pulled
//! - Exhaustion is recorded once and never retried
//! - Source errors propagate to the caller; cached records stay readable
//!
//! There is no eviction. The source cannot be re-read from an earlier point,
//! so dropping records would make backward scrolling impossible; memory grows
//! with the number of records viewed.

use tracing::{debug, trace};

use crate::source::RecordSource;

/// How many windows beyond the requested offset are pulled on each fetch.
pub const PREFETCH_WINDOWS: usize = 2;

/// A growing, gap-free cache over a forward-only record source.
pub struct PrefetchCache<S: RecordSource> {
    /// The record source being drained.
    source: S,
    /// Every record pulled so far, index 0 being the first ever delivered.
    records: Vec<S::Record>,
    /// Whether the source reported exhaustion.
    exhausted: bool,
}

impl<S: RecordSource> PrefetchCache<S> {
    /// Create an empty cache bound to a source.
    pub fn new(source: S) -> Self {
        Self {
            source,
            records: Vec::new(),
            exhausted: false,
        }
    }

    /// Fetch up to `limit` records starting at `offset`.
    ///
    /// Pulls from the source until at least `offset + 2 * limit` records are
    /// cached or the source is exhausted, then returns the requested slice
    /// clipped to what is available. The slice may be shorter than `limit`,
    /// or empty, near the end of the source.
    ///
    /// # Errors
    ///
    /// Returns the source's error if a pull fails. Records pulled before the
    /// failure remain cached.
    pub fn fetch(&mut self, offset: usize, limit: usize) -> Result<&[S::Record], S::Error> {
        let target = offset.saturating_add(limit.saturating_mul(PREFETCH_WINDOWS));
        self.fill_to(target)?;

        let start = offset.min(self.records.len());
        let end = offset.saturating_add(limit).min(self.records.len());
        Ok(&self.records[start..end])
    }

    /// Pull from the source until `target` records are cached or it runs dry.
    fn fill_to(&mut self, target: usize) -> Result<(), S::Error> {
        while !self.exhausted && self.records.len() < target {
            match self.source.pull()? {
                Some(record) => {
                    self.records.push(record);
                    trace!(cached = self.records.len(), "Pulled record");
                }
                None => {
                    self.exhausted = true;
                    debug!(total = self.records.len(), "Record source exhausted");
                }
            }
        }
        Ok(())
    }

    /// Get a cached record by absolute position.
    pub fn get(&self, index: usize) -> Option<&S::Record> {
        self.records.get(index)
    }

    /// Number of records cached so far.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the source has reported exhaustion.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Ticket;
    use crate::source::IterSource;
    use std::cell::Cell;
    use std::rc::Rc;

    /// A finite source that counts pulls and can fail at a chosen pull.
    struct CountingSource {
        next_id: u64,
        total: u64,
        pulls: Rc<Cell<usize>>,
        fail_at: Option<usize>,
    }

    impl CountingSource {
        fn new(total: u64) -> (Self, Rc<Cell<usize>>) {
            let pulls = Rc::new(Cell::new(0));
            let source = Self {
                next_id: 1,
                total,
                pulls: Rc::clone(&pulls),
                fail_at: None,
            };
            (source, pulls)
        }
    }

    impl RecordSource for CountingSource {
        type Record = Ticket;
        type Error = String;

        fn pull(&mut self) -> Result<Option<Ticket>, String> {
            let pull = self.pulls.get() + 1;
            self.pulls.set(pull);
            if self.fail_at == Some(pull) {
                self.fail_at = None;
                return Err("transport failure".to_string());
            }
            if self.next_id > self.total {
                return Ok(None);
            }
            let ticket = Ticket::sample(self.next_id);
            self.next_id += 1;
            Ok(Some(ticket))
        }
    }

    fn ids(records: &[Ticket]) -> Vec<u64> {
        records.iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_new_cache_is_empty() {
        let cache = PrefetchCache::new(IterSource::new((1..=3).map(Ticket::sample)));
        assert!(cache.is_empty());
        assert!(!cache.is_exhausted());
        assert!(cache.get(0).is_none());
    }

    #[test]
    fn test_fetch_returns_requested_slice() {
        let (source, _) = CountingSource::new(100);
        let mut cache = PrefetchCache::new(source);

        assert_eq!(ids(cache.fetch(0, 4).unwrap()), vec![1, 2, 3, 4]);
        assert_eq!(ids(cache.fetch(3, 2).unwrap()), vec![4, 5]);
    }

    #[test]
    fn test_fetch_prefetches_two_windows_ahead() {
        let (source, pulls) = CountingSource::new(100);
        let mut cache = PrefetchCache::new(source);

        cache.fetch(5, 10).unwrap();
        assert_eq!(cache.len(), 25);
        assert_eq!(pulls.get(), 25);
    }

    #[test]
    fn test_fetch_within_prefetched_range_does_not_pull() {
        let (source, pulls) = CountingSource::new(100);
        let mut cache = PrefetchCache::new(source);

        cache.fetch(0, 10).unwrap();
        let before = pulls.get();
        cache.fetch(8, 6).unwrap();
        assert_eq!(pulls.get(), before);
    }

    #[test]
    fn test_rereads_are_identical() {
        let (source, _) = CountingSource::new(50);
        let mut cache = PrefetchCache::new(source);

        let first = cache.fetch(3, 5).unwrap().to_vec();
        cache.fetch(20, 10).unwrap();
        cache.fetch(0, 2).unwrap();
        let again = cache.fetch(3, 5).unwrap().to_vec();

        assert_eq!(first, again);
        for i in 0..cache.len() {
            assert_eq!(cache.get(i).map(|t| t.id), Some(i as u64 + 1));
        }
    }

    #[test]
    fn test_prefetch_bound_is_clipped_by_total() {
        for (offset, limit) in [(0, 4), (2, 7), (30, 1), (0, 0)] {
            let (source, _) = CountingSource::new(12);
            let mut cache = PrefetchCache::new(source);
            cache.fetch(offset, limit).unwrap();
            assert!(cache.len() >= (offset + 2 * limit).min(12));
        }
    }

    #[test]
    fn test_short_reads_after_exhaustion() {
        let (source, _) = CountingSource::new(10);
        let mut cache = PrefetchCache::new(source);

        assert_eq!(cache.fetch(8, 5).unwrap().len(), 2);
        assert!(cache.is_exhausted());
        assert_eq!(cache.len(), 10);

        for offset in 0..15 {
            for limit in 0..6 {
                let expected = if offset >= 10 { 0 } else { limit.min(10 - offset) };
                assert_eq!(cache.fetch(offset, limit).unwrap().len(), expected);
            }
        }
    }

    #[test]
    fn test_no_pulls_after_exhaustion() {
        let (source, pulls) = CountingSource::new(3);
        let mut cache = PrefetchCache::new(source);

        cache.fetch(0, 10).unwrap();
        assert!(cache.is_exhausted());
        let after_exhaustion = pulls.get();

        cache.fetch(0, 10).unwrap();
        cache.fetch(50, 10).unwrap();
        assert_eq!(pulls.get(), after_exhaustion);
    }

    #[test]
    fn test_empty_source() {
        let mut cache = PrefetchCache::new(IterSource::new(std::iter::empty::<Ticket>()));
        assert!(cache.fetch(0, 4).unwrap().is_empty());
        assert!(cache.is_exhausted());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_zero_limit_is_empty_without_pulling() {
        let (source, pulls) = CountingSource::new(10);
        let mut cache = PrefetchCache::new(source);

        assert!(cache.fetch(0, 0).unwrap().is_empty());
        assert_eq!(pulls.get(), 0);
    }

    #[test]
    fn test_source_error_propagates_and_keeps_records() {
        let (mut source, _) = CountingSource::new(20);
        source.fail_at = Some(4);
        let mut cache = PrefetchCache::new(source);

        let err = cache.fetch(0, 3).unwrap_err();
        assert_eq!(err, "transport failure");
        assert_eq!(cache.len(), 3);
        assert!(!cache.is_exhausted());
        assert_eq!(cache.get(2).map(|t| t.id), Some(3));

        // The cache makes no retry decision; the next fetch simply pulls again.
        assert_eq!(ids(cache.fetch(0, 3).unwrap()), vec![1, 2, 3]);
        assert_eq!(cache.len(), 6);
    }
}
