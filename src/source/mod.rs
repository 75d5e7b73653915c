//! Record sources feeding the ticket list.
//!
//! A record source is a forward-only, single-pass producer of records. The
//! list never asks a source to rewind; it only pulls the next record and
//! treats `Ok(None)` as the permanent end of the sequence.

mod demo;
mod feed;

#[cfg(test)]
use std::convert::Infallible;
use std::fmt;

pub use demo::DemoSource;
pub use feed::{FeedMessage, TicketFeed};

/// A read-only record that can be displayed as a table row.
pub trait Record {
    /// Stable identifier type.
    type Id: fmt::Display + Clone;

    /// The record's stable identifier.
    fn id(&self) -> Self::Id;

    /// Look up a named field.
    ///
    /// Returns `None` when the field is absent or null.
    fn field(&self, key: &str) -> Option<String>;
}

/// A lazy, forward-only producer of records.
pub trait RecordSource {
    /// The record type produced.
    type Record: Record;
    /// Failure other than exhaustion, e.g. a transport error.
    type Error;

    /// Pull the next record.
    ///
    /// `Ok(None)` signals exhaustion. A record is never delivered twice.
    fn pull(&mut self) -> Result<Option<Self::Record>, Self::Error>;
}

/// Adapts any iterator of records into an infallible [`RecordSource`].
///
/// Lets tests drive the list from a fixed set of records.
#[cfg(test)]
#[derive(Debug)]
pub struct IterSource<I> {
    inner: I,
}

#[cfg(test)]
impl<I> IterSource<I> {
    /// Wrap an iterator.
    pub fn new(inner: I) -> Self {
        Self { inner }
    }
}

#[cfg(test)]
impl<I> RecordSource for IterSource<I>
where
    I: Iterator,
    I::Item: Record,
{
    type Record = I::Item;
    type Error = Infallible;

    fn pull(&mut self) -> Result<Option<Self::Record>, Self::Error> {
        Ok(self.inner.next())
    }
}
