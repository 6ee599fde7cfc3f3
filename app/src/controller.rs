//! In-memory list state reconciled optimistically against the server.
//!
//! # Design
//! The controller holds the session's working copy of the todo collection —
//! a cache, never the canonical store. Every mutating action follows one
//! pattern: capture a snapshot, apply the change locally first, call the
//! gateway, and on failure restore the snapshot. Confirmed mutations are NOT
//! merged back field-by-field from the server response; the optimistic value
//! already matches intent. Create is the exception: the server is
//! authoritative for `id`/`createdAt`, so the returned entity is merged to
//! the front of the list.
//!
//! Failures are logged and swallowed — the controller is the single place
//! that converts errors into user-visible-safe state, and no mutation is
//! fatal.
//!
//! Overlapping mutations on the same id are not coordinated: each rollback
//! restores its own captured snapshot, so hosts that parallelize calls on
//! one item can observe a stale rollback. Last write in flight wins.
//!
//! The "currently editing" item is mirrored by a navigable route id
//! (`route`); `resolve_route` re-runs the resolution rules whenever the
//! working copy or the route changes.

use todo_core::{Todo, UpdateTodo};
use tracing::warn;

use crate::api::Api;
use crate::transport::Transport;

/// Which subset of the working copy is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    fn matches(self, todo: &Todo) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !todo.completed,
            Filter::Completed => todo.completed,
        }
    }
}

/// Number of items per completion state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StateCounts {
    pub active: usize,
    pub completed: usize,
}

/// Client-side list state: working copy, filter, and the editing target.
pub struct ListController<T> {
    api: Api<T>,
    todos: Vec<Todo>,
    filter: Filter,
    editing: Option<Todo>,
    route: Option<String>,
}

impl<T: Transport> ListController<T> {
    pub fn new(api: Api<T>) -> Self {
        Self {
            api,
            todos: Vec::new(),
            filter: Filter::All,
            editing: None,
            route: None,
        }
    }

    // -----------------------------------------------------------------------
    // Working copy & derived views
    // -----------------------------------------------------------------------

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Items matching the current filter, in working-copy order.
    pub fn filtered(&self) -> Vec<&Todo> {
        self.todos
            .iter()
            .filter(|todo| self.filter.matches(todo))
            .collect()
    }

    /// Per-state counts over the full working copy (not the filtered view).
    pub fn counts(&self) -> StateCounts {
        let completed = self.todos.iter().filter(|t| t.completed).count();
        StateCounts {
            active: self.todos.len() - completed,
            completed,
        }
    }

    /// Replace the working copy with a fresh full listing. On failure the
    /// current copy is kept.
    pub fn refresh(&mut self) {
        match self.api.list() {
            Ok(todos) => {
                self.todos = todos;
                self.resolve_route();
            }
            Err(err) => warn!(error = %err, "failed to load todos"),
        }
    }

    // -----------------------------------------------------------------------
    // Optimistic mutations
    // -----------------------------------------------------------------------

    /// Create a todo. Blank titles are a no-op (the Add control is disabled
    /// client-side, and the server would reject them anyway). There is no
    /// optimistic placeholder row: the server-returned canonical entity is
    /// merged to the front on success.
    pub fn add(&mut self, title: &str) {
        let title = title.trim();
        if title.is_empty() {
            return;
        }
        match self.api.create(title) {
            Ok(created) => self.todos.insert(0, created),
            Err(err) => warn!(error = %err, "failed to create todo"),
        }
    }

    /// Flip completion. Optimistic; on failure the captured prior flag is
    /// restored for that id.
    pub fn toggle(&mut self, id: &str) {
        let Some(before) = self.todos.iter().find(|t| t.id == id).map(|t| t.completed) else {
            return;
        };
        let new_val = !before;
        self.set_completed(id, new_val);

        let input = UpdateTodo {
            title: None,
            completed: Some(new_val),
        };
        if let Err(err) = self.api.update(id, &input) {
            warn!(error = %err, id, "failed to update todo");
            self.set_completed(id, before);
        }
        self.resolve_route();
    }

    /// Retitle an item. Optimistic; on failure the full pre-mutation list is
    /// restored.
    pub fn edit(&mut self, id: &str, title: &str) {
        if !self.todos.iter().any(|t| t.id == id) {
            return;
        }
        let before = self.todos.clone();
        if let Some(todo) = self.todos.iter_mut().find(|t| t.id == id) {
            todo.title = title.to_string();
        }

        let input = UpdateTodo {
            title: Some(title.to_string()),
            completed: None,
        };
        if let Err(err) = self.api.update(id, &input) {
            warn!(error = %err, id, "failed to edit todo");
            self.todos = before;
        }
        self.resolve_route();
    }

    /// Delete an item. Optimistic; on any failure (a 404 included) the full
    /// pre-delete list is restored.
    pub fn remove(&mut self, id: &str) {
        let before = self.todos.clone();
        self.todos.retain(|t| t.id != id);

        if let Err(err) = self.api.delete(id) {
            warn!(error = %err, id, "failed to delete todo");
            self.todos = before;
        }
        self.resolve_route();
    }

    fn set_completed(&mut self, id: &str, completed: bool) {
        if let Some(todo) = self.todos.iter_mut().find(|t| t.id == id) {
            todo.completed = completed;
        }
    }

    // -----------------------------------------------------------------------
    // Editing target & route synchronization
    // -----------------------------------------------------------------------

    /// The item currently open in the editor, if any.
    pub fn editing(&self) -> Option<&Todo> {
        self.editing.as_ref()
    }

    /// The navigable identifier mirroring the editing target. The host syncs
    /// this to its URL; absence means the base list view.
    pub fn route(&self) -> Option<&str> {
        self.route.as_deref()
    }

    /// Open the editor for an item already in the working copy. Unknown ids
    /// are ignored (deep links to unknown ids arrive via `navigate` instead).
    pub fn request_edit(&mut self, id: &str) {
        let Some(todo) = self.todos.iter().find(|t| t.id == id).cloned() else {
            return;
        };
        self.route = Some(id.to_string());
        self.editing = Some(todo);
    }

    /// The route changed from outside (deep link, back/forward navigation).
    pub fn navigate(&mut self, id: Option<&str>) {
        self.route = id.map(str::to_string);
        self.resolve_route();
    }

    /// Commit the editor's title, then close the editor and return to the
    /// base view — whether or not the underlying save sticks; a failed save
    /// rolls the list back but never re-opens the modal.
    pub fn save_edit(&mut self, id: &str, title: &str) {
        self.edit(id, title);
        self.editing = None;
        self.route = None;
    }

    /// Close the editor without saving.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.route = None;
    }

    /// Re-derive the editing target from (working copy, route, current
    /// target):
    /// - no route → editor closed
    /// - route already matches the target → no change
    /// - route id in the working copy → that item becomes the target
    /// - otherwise → fetch by id; merge and target on success, clear the
    ///   route on failure
    fn resolve_route(&mut self) {
        let Some(id) = self.route.clone() else {
            self.editing = None;
            return;
        };
        if self.editing.as_ref().is_some_and(|t| t.id == id) {
            return;
        }
        if let Some(todo) = self.todos.iter().find(|t| t.id == id).cloned() {
            self.editing = Some(todo);
            return;
        }
        match self.api.get(&id) {
            Ok(fetched) => {
                if !self.todos.iter().any(|t| t.id == fetched.id) {
                    self.todos.insert(0, fetched.clone());
                }
                self.editing = Some(fetched);
            }
            Err(err) => {
                warn!(error = %err, id, "failed to load todo for edit route");
                self.route = None;
                self.editing = None;
            }
        }
    }
}
