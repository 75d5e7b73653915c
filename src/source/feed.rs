//! Channel-fed ticket source.
//!
//! The background feed worker (see `tasks::run_feed`) fetches ticket pages
//! off the event thread and sends them here through a bounded channel. The
//! channel capacity limits how many pages the worker may run ahead.

use std::collections::VecDeque;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::RecordSource;
use crate::api::types::Ticket;
use crate::api::ApiError;

/// Messages sent from the feed worker to the viewer.
#[derive(Debug)]
pub enum FeedMessage {
    /// A page of tickets, in API order.
    Page(Vec<Ticket>),
    /// The last page has been delivered.
    End,
    /// The worker gave up; no further messages follow.
    Failed(ApiError),
}

/// A [`RecordSource`] draining pages delivered by the feed worker.
///
/// `pull` only blocks when the local buffer is empty and the worker has not
/// delivered the next page yet. Must not be pulled from inside an async
/// context.
#[derive(Debug)]
pub struct TicketFeed {
    rx: mpsc::Receiver<FeedMessage>,
    buffer: VecDeque<Ticket>,
    /// Set once `End`, `Failed` or a closed channel has been seen.
    finished: bool,
}

impl TicketFeed {
    /// Create a feed reading from the worker's channel.
    pub fn new(rx: mpsc::Receiver<FeedMessage>) -> Self {
        Self {
            rx,
            buffer: VecDeque::new(),
            finished: false,
        }
    }

    /// Number of tickets received but not yet pulled.
    #[cfg(test)]
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }
}

impl RecordSource for TicketFeed {
    type Record = Ticket;
    type Error = ApiError;

    fn pull(&mut self) -> Result<Option<Ticket>, ApiError> {
        loop {
            if let Some(ticket) = self.buffer.pop_front() {
                return Ok(Some(ticket));
            }
            if self.finished {
                return Ok(None);
            }

            match self.rx.blocking_recv() {
                Some(FeedMessage::Page(tickets)) => {
                    debug!(count = tickets.len(), "Received ticket page");
                    self.buffer.extend(tickets);
                }
                Some(FeedMessage::End) => {
                    debug!("Ticket feed finished");
                    self.finished = true;
                }
                Some(FeedMessage::Failed(e)) => {
                    warn!(error = %e, "Ticket feed failed");
                    self.finished = true;
                    return Err(e);
                }
                None => {
                    debug!("Ticket feed channel closed");
                    self.finished = true;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(ids: std::ops::RangeInclusive<u64>) -> FeedMessage {
        FeedMessage::Page(ids.map(Ticket::sample).collect())
    }

    fn drain(feed: &mut TicketFeed) -> Vec<u64> {
        std::iter::from_fn(|| feed.pull().unwrap()).map(|t| t.id).collect()
    }

    #[test]
    fn test_pages_are_flattened_in_order() {
        let (tx, rx) = mpsc::channel(4);
        tx.try_send(page(1..=3)).unwrap();
        tx.try_send(page(4..=5)).unwrap();
        tx.try_send(FeedMessage::End).unwrap();

        let mut feed = TicketFeed::new(rx);
        assert_eq!(drain(&mut feed), vec![1, 2, 3, 4, 5]);
        assert!(feed.pull().unwrap().is_none());
    }

    #[test]
    fn test_buffered_counts_undelivered_tickets() {
        let (tx, rx) = mpsc::channel(2);
        tx.try_send(page(1..=4)).unwrap();

        let mut feed = TicketFeed::new(rx);
        assert_eq!(feed.buffered(), 0);
        feed.pull().unwrap();
        assert_eq!(feed.buffered(), 3);
    }

    #[test]
    fn test_closed_channel_is_exhaustion() {
        let (tx, rx) = mpsc::channel(2);
        tx.try_send(page(1..=2)).unwrap();
        drop(tx);

        let mut feed = TicketFeed::new(rx);
        assert_eq!(drain(&mut feed), vec![1, 2]);
    }

    #[test]
    fn test_failure_is_reported_once_then_exhausted() {
        let (tx, rx) = mpsc::channel(4);
        tx.try_send(page(1..=2)).unwrap();
        tx.try_send(FeedMessage::Failed(ApiError::RateLimited)).unwrap();

        let mut feed = TicketFeed::new(rx);
        assert_eq!(feed.pull().unwrap().map(|t| t.id), Some(1));
        assert_eq!(feed.pull().unwrap().map(|t| t.id), Some(2));
        assert!(matches!(feed.pull(), Err(ApiError::RateLimited)));
        assert!(feed.pull().unwrap().is_none());
    }

    #[test]
    fn test_blocks_until_worker_delivers() {
        let (tx, rx) = mpsc::channel(1);
        let worker = std::thread::spawn(move || {
            std::thread::sleep(std::time::Duration::from_millis(20));
            tx.blocking_send(page(7..=7)).unwrap();
        });

        let mut feed = TicketFeed::new(rx);
        assert_eq!(feed.pull().unwrap().map(|t| t.id), Some(7));
        worker.join().unwrap();
        assert!(feed.pull().unwrap().is_none());
    }
}
