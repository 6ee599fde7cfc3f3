//! Client-side layers for the todo application.
//!
//! # Overview
//! Everything between a UI shell and the HTTP API: a `Transport` seam that
//! executes the plain-data requests built by `todo-core`, a typed gateway
//! (`Api`) over the five CRUD operations, the `ListController` that holds the
//! working copy and reconciles optimistic mutations against the server, and
//! the `EditModal` draft-title state for the single-item editor.
//!
//! # Design
//! The controller applies every mutation locally before the network call and
//! rolls back to its captured snapshot when the call fails; failures are
//! logged and swallowed so the UI always lands in a consistent state. The
//! "currently editing" item is mirrored by a navigable route id the host
//! syncs to its URL.

pub mod api;
pub mod controller;
pub mod modal;
pub mod transport;

pub use api::Api;
pub use controller::{Filter, ListController, StateCounts};
pub use modal::{can_add, EditModal};
pub use transport::{HttpTransport, Transport, TransportError};
