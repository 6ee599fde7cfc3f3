//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the server's wire schema but are defined independently;
//! the app crate's integration tests catch schema drift between the two.
//! `created_at` is a Unix-millisecond instant and serializes as `createdAt`
//! to match the persisted record layout.

use serde::{Deserialize, Serialize};

/// A single todo item returned by the API.
///
/// `id` is an opaque string minted by the server at creation; `created_at`
/// is the creation instant and the default ordering key (newest first).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub completed: bool,
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

/// Request payload for creating a new todo. The server assigns `id` and
/// `createdAt` and forces `completed` to false.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub title: String,
}

/// Request payload for updating an existing todo. Only the fields present in
/// the JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}
