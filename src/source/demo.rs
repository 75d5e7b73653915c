//! Synthetic ticket source for running the viewer without an account.

use std::convert::Infallible;

use super::RecordSource;
use crate::api::types::Ticket;

const SUBJECTS: &[&str] = &[
    "Unable to log in after password reset",
    "Invoice shows the wrong billing address",
    "Feature request: dark mode for the dashboard",
    "Exports time out for large date ranges",
    "Question about seat-based pricing",
    "Webhook deliveries are delayed",
    "Mobile app crashes on launch",
];

const TYPES: &[Option<&str>] = &[
    Some("incident"),
    Some("question"),
    None,
    Some("problem"),
    Some("task"),
];

const PRIORITIES: &[Option<&str>] = &[
    Some("normal"),
    None,
    Some("high"),
    Some("low"),
    Some("urgent"),
    None,
];

const STATUSES: &[&str] = &["new", "open", "pending", "solved"];

/// Deterministic generator of fake tickets.
///
/// Ticket `n` always has the same fields, so sessions are reproducible.
#[derive(Debug, Clone)]
pub struct DemoSource {
    next_id: u64,
    /// Number of tickets to produce, `None` for an unbounded stream.
    total: Option<u64>,
}

impl DemoSource {
    /// Create a source producing `total` tickets, or unboundedly many.
    pub fn new(total: Option<u64>) -> Self {
        Self { next_id: 1, total }
    }

    /// Build the ticket with the given number.
    pub fn ticket(id: u64) -> Ticket {
        let i = (id - 1) as usize;
        Ticket {
            id,
            url: None,
            subject: Some(format!("{} (#{})", SUBJECTS[i % SUBJECTS.len()], id)),
            description: None,
            ticket_type: TYPES[i % TYPES.len()].map(str::to_string),
            priority: PRIORITIES[i % PRIORITIES.len()].map(str::to_string),
            status: Some(STATUSES[i % STATUSES.len()].to_string()),
            requester_id: Some(1000 + id % 17),
            assignee_id: None,
            tags: vec!["demo".to_string()],
            created_at: None,
            updated_at: None,
        }
    }
}

impl RecordSource for DemoSource {
    type Record = Ticket;
    type Error = Infallible;

    fn pull(&mut self) -> Result<Option<Ticket>, Infallible> {
        if self.total.is_some_and(|total| self.next_id > total) {
            return Ok(None);
        }
        let ticket = Self::ticket(self.next_id);
        self.next_id += 1;
        Ok(Some(ticket))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_demo_source() {
        let mut source = DemoSource::new(Some(3));
        let ids: Vec<u64> = std::iter::from_fn(|| source.pull().unwrap())
            .map(|t| t.id)
            .collect();

        assert_eq!(ids, vec![1, 2, 3]);
        assert!(source.pull().unwrap().is_none());
    }

    #[test]
    fn test_unbounded_demo_source_keeps_going() {
        let mut source = DemoSource::new(None);
        for expected in 1..=500 {
            assert_eq!(source.pull().unwrap().map(|t| t.id), Some(expected));
        }
    }

    #[test]
    fn test_demo_tickets_are_deterministic() {
        assert_eq!(DemoSource::ticket(42), DemoSource::ticket(42));
        assert!(DemoSource::ticket(3).ticket_type.is_none());
        assert!(DemoSource::ticket(2).priority.is_none());
    }

    #[test]
    fn test_empty_demo_source() {
        let mut source = DemoSource::new(Some(0));
        assert!(source.pull().unwrap().is_none());
    }
}
