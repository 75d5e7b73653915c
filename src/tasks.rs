//! Background ticket fetching.
//!
//! The viewer's event loop is synchronous. Ticket pages are fetched by a
//! tokio task that sends them through a bounded channel to a [`TicketFeed`],
//! which the list's cache pulls from. This keeps network latency off the
//! event thread whenever the worker is ahead of the viewer.
//!
//! # Architecture
//!
//! 1. `main` owns a tokio runtime and hands its handle to `TaskSpawner`
//! 2. `TaskSpawner::spawn_ticket_feed` creates the channel and spawns `run_feed`
//! 3. `run_feed` walks the cursor-paginated ticket listing, sending one
//!    `FeedMessage::Page` per API page; a full channel suspends it
//! 4. The cache pulls tickets from the `TicketFeed` as the viewport needs them
//! 5. Dropping the feed closes the channel and the worker stops at its next send

use std::future::Future;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::api::error::Result;
use crate::api::types::TicketPage;
use crate::api::ZendeskClient;
use crate::source::{FeedMessage, TicketFeed};

/// Spawns background tasks on the application's runtime.
#[derive(Clone)]
pub struct TaskSpawner {
    handle: Handle,
}

impl TaskSpawner {
    /// Create a new TaskSpawner using the given runtime handle.
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Spawn a worker streaming every ticket of the account.
    ///
    /// `depth` is the number of pages the worker may fetch ahead of the viewer.
    pub fn spawn_ticket_feed(&self, client: &ZendeskClient, page_size: u32, depth: usize) -> TicketFeed {
        let (tx, rx) = mpsc::channel(depth.max(1));
        let client = client.clone();
        info!(page_size, depth, "Starting ticket feed");

        self.handle.spawn(run_feed(tx, move |cursor| {
            let client = client.clone();
            async move { client.list_tickets(cursor.as_deref(), page_size).await }
        }));

        TicketFeed::new(rx)
    }
}

/// Walk a cursor-paginated listing, forwarding each page to `tx`.
///
/// `fetch_page` is called with `None` for the first page and with the
/// previous page's `after_cursor` afterwards. Sends `End` after the last page
/// and `Failed` on the first error. Returns early if the receiver is dropped.
pub async fn run_feed<F, Fut>(tx: mpsc::Sender<FeedMessage>, mut fetch_page: F)
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<TicketPage>>,
{
    let mut cursor: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = match fetch_page(cursor.take()).await {
            Ok(page) => page,
            Err(e) => {
                warn!(error = %e, pages, "Ticket feed stopped on error");
                let _ = tx.send(FeedMessage::Failed(e)).await;
                return;
            }
        };
        pages += 1;

        let next = page.next_cursor();
        if !page.tickets.is_empty() && tx.send(FeedMessage::Page(page.tickets)).await.is_err() {
            debug!(pages, "Ticket feed receiver dropped");
            return;
        }

        match next {
            Some(after) => cursor = Some(after),
            None => {
                info!(pages, "Ticket feed reached the last page");
                let _ = tx.send(FeedMessage::End).await;
                return;
            }
        }
    }
}
