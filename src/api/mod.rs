//! Zendesk API client and types.
//!
//! This module provides the interface for communicating with the Zendesk
//! Support REST API.

pub mod auth;
mod client;
pub mod error;
pub mod types;

pub use client::ZendeskClient;
pub use error::ApiError;
