//! Zendesk API response types.
//!
//! These types model the parts of the Zendesk Support API v2 responses used
//! by the viewer: tickets, cursor-paginated ticket pages and the current user.

use serde::{Deserialize, Serialize};

use crate::source::Record;

/// The current authenticated user.
///
/// Returned (wrapped in `{"user": ...}`) by `GET /api/v2/users/me.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// The user's ID.
    pub id: u64,
    /// The user's display name.
    pub name: String,
    /// The user's email address.
    #[serde(default)]
    pub email: Option<String>,
    /// The user's role (end-user, agent, admin).
    #[serde(default)]
    pub role: Option<String>,
}

/// Envelope for `GET /api/v2/users/me.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentUserResponse {
    pub user: CurrentUser,
}

/// A Zendesk support ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// The ticket number.
    pub id: u64,
    /// API URL of the ticket.
    #[serde(default)]
    pub url: Option<String>,
    /// The ticket subject line.
    #[serde(default)]
    pub subject: Option<String>,
    /// The first comment on the ticket.
    #[serde(default)]
    pub description: Option<String>,
    /// Ticket type: problem, incident, question or task.
    #[serde(rename = "type", default)]
    pub ticket_type: Option<String>,
    /// Priority: urgent, high, normal or low.
    #[serde(default)]
    pub priority: Option<String>,
    /// Status: new, open, pending, hold, solved or closed.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub requester_id: Option<u64>,
    #[serde(default)]
    pub assignee_id: Option<u64>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// ISO 8601 creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
    /// ISO 8601 last update timestamp.
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Record for Ticket {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }

    fn field(&self, key: &str) -> Option<String> {
        match key {
            "id" => Some(self.id.to_string()),
            "url" => self.url.clone(),
            "subject" => self.subject.clone(),
            "description" => self.description.clone(),
            "type" => self.ticket_type.clone(),
            "priority" => self.priority.clone(),
            "status" => self.status.clone(),
            "requester_id" => self.requester_id.map(|id| id.to_string()),
            "assignee_id" => self.assignee_id.map(|id| id.to_string()),
            "tags" if !self.tags.is_empty() => Some(self.tags.join(", ")),
            "created_at" => self.created_at.clone(),
            "updated_at" => self.updated_at.clone(),
            _ => None,
        }
    }
}

/// Cursor pagination metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageMeta {
    /// Whether another page follows this one.
    #[serde(default)]
    pub has_more: bool,
    /// Cursor for the next page.
    #[serde(default)]
    pub after_cursor: Option<String>,
    /// Cursor for the previous page.
    #[serde(default)]
    pub before_cursor: Option<String>,
}

/// Navigation links for cursor pagination.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageLinks {
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub prev: Option<String>,
}

/// One page of tickets.
///
/// Returned by `GET /api/v2/tickets.json` with cursor pagination.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TicketPage {
    /// The tickets on this page, in API order.
    #[serde(default)]
    pub tickets: Vec<Ticket>,
    #[serde(default)]
    pub meta: PageMeta,
    #[serde(default)]
    pub links: PageLinks,
}

impl TicketPage {
    /// Check if there are more pages of results.
    pub fn has_more(&self) -> bool {
        self.meta.has_more && self.meta.after_cursor.is_some()
    }

    /// Get the cursor for the next page, if any.
    pub fn next_cursor(&self) -> Option<String> {
        if self.has_more() {
            self.meta.after_cursor.clone()
        } else {
            None
        }
    }
}

#[cfg(test)]
impl Ticket {
    /// Build a ticket with predictable fields for tests.
    pub fn sample(id: u64) -> Self {
        Self {
            id,
            url: None,
            subject: Some(format!("Ticket number {}", id)),
            description: None,
            ticket_type: Some("incident".to_string()),
            priority: None,
            status: Some("open".to_string()),
            requester_id: None,
            assignee_id: None,
            tags: vec![],
            created_at: None,
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_JSON: &str = r#"{
        "tickets": [
            {
                "id": 35436,
                "url": "https://example.zendesk.com/api/v2/tickets/35436.json",
                "subject": "Help, my printer is on fire!",
                "type": "incident",
                "priority": "high",
                "status": "open",
                "requester_id": 20978392,
                "assignee_id": null,
                "tags": ["enterprise", "other_tag"],
                "created_at": "2009-07-20T22:55:29Z"
            },
            {
                "id": 35437,
                "subject": null,
                "type": null,
                "priority": null
            }
        ],
        "meta": {
            "has_more": true,
            "after_cursor": "xxx",
            "before_cursor": "yyy"
        },
        "links": {
            "next": "https://example.zendesk.com/api/v2/tickets.json?page[size]=2&page[after]=xxx",
            "prev": null
        }
    }"#;

    #[test]
    fn test_ticket_page_deserialization() {
        let page: TicketPage = serde_json::from_str(PAGE_JSON).unwrap();

        assert_eq!(page.tickets.len(), 2);
        assert_eq!(page.tickets[0].id, 35436);
        assert_eq!(page.tickets[0].ticket_type.as_deref(), Some("incident"));
        assert_eq!(page.tickets[0].tags, vec!["enterprise", "other_tag"]);
        assert!(page.tickets[1].subject.is_none());
        assert!(page.links.next.is_some());
    }

    #[test]
    fn test_next_cursor_when_more() {
        let page: TicketPage = serde_json::from_str(PAGE_JSON).unwrap();
        assert!(page.has_more());
        assert_eq!(page.next_cursor(), Some("xxx".to_string()));
    }

    #[test]
    fn test_next_cursor_on_last_page() {
        let page: TicketPage =
            serde_json::from_str(r#"{"tickets": [], "meta": {"has_more": false}}"#).unwrap();
        assert!(!page.has_more());
        assert_eq!(page.next_cursor(), None);
    }

    #[test]
    fn test_has_more_without_cursor_is_last_page() {
        let page: TicketPage =
            serde_json::from_str(r#"{"tickets": [], "meta": {"has_more": true}}"#).unwrap();
        assert_eq!(page.next_cursor(), None);
    }

    #[test]
    fn test_ticket_record_fields() {
        let page: TicketPage = serde_json::from_str(PAGE_JSON).unwrap();
        let ticket = &page.tickets[0];

        assert_eq!(Record::id(ticket), 35436);
        assert_eq!(ticket.field("id"), Some("35436".to_string()));
        assert_eq!(ticket.field("priority"), Some("high".to_string()));
        assert_eq!(ticket.field("requester_id"), Some("20978392".to_string()));
        assert_eq!(ticket.field("tags"), Some("enterprise, other_tag".to_string()));
        assert_eq!(ticket.field("assignee_id"), None);
        assert_eq!(ticket.field("no_such_field"), None);
    }

    #[test]
    fn test_ticket_null_fields() {
        let page: TicketPage = serde_json::from_str(PAGE_JSON).unwrap();
        let ticket = &page.tickets[1];

        assert_eq!(ticket.subject(), "");
        assert_eq!(ticket.field("subject"), None);
        assert_eq!(ticket.field("type"), None);
        assert_eq!(ticket.field("tags"), None);
    }

    #[test]
    fn test_current_user_envelope() {
        let json = r#"{"user": {"id": 1, "name": "Agent Smith", "email": "smith@example.com", "role": "agent"}}"#;
        let response: CurrentUserResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.user.name, "Agent Smith");
        assert_eq!(response.user.role.as_deref(), Some("agent"));
    }
}
