//! Screen views.

mod list;

pub use list::{ListAction, ListView, PagingSummary};
