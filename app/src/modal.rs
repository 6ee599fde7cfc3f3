//! Draft-title state for the single-item editor.
//!
//! The modal is a pure function of the editing target: it opens when an item
//! is targeted, closes when nothing is, and re-seeds its draft when the
//! target switches to a different item. Submission yields the trimmed title
//! only when the draft is non-blank — the same guard that keeps the Save
//! control disabled.

use todo_core::Todo;

/// Editor state over one todo's title.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditModal {
    #[default]
    Closed,
    Open {
        id: String,
        draft: String,
    },
}

impl EditModal {
    /// Open on `todo`, seeding the draft from its current title.
    pub fn open(todo: &Todo) -> Self {
        EditModal::Open {
            id: todo.id.clone(),
            draft: todo.title.clone(),
        }
    }

    /// Derive the next modal state from the current editing target: close
    /// when nothing is targeted, keep the in-progress draft while the same
    /// item stays targeted, re-seed when the target switches.
    pub fn sync(self, target: Option<&Todo>) -> Self {
        match (self, target) {
            (_, None) => EditModal::Closed,
            (EditModal::Open { id, draft }, Some(t)) if id == t.id => {
                EditModal::Open { id, draft }
            }
            (_, Some(t)) => EditModal::open(t),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, EditModal::Open { .. })
    }

    /// Replace the draft text. No-op while closed.
    pub fn set_draft(&mut self, text: &str) {
        if let EditModal::Open { draft, .. } = self {
            *draft = text.to_string();
        }
    }

    /// Whether the Save control is enabled: open with a non-blank draft.
    pub fn can_save(&self) -> bool {
        matches!(self, EditModal::Open { draft, .. } if !draft.trim().is_empty())
    }

    /// The `(id, trimmed title)` to commit, or `None` when closed or blank.
    pub fn submit(&self) -> Option<(String, String)> {
        match self {
            EditModal::Open { id, draft } if !draft.trim().is_empty() => {
                Some((id.clone(), draft.trim().to_string()))
            }
            _ => None,
        }
    }
}

/// Whether the Add control is enabled for `input` — the client-side mirror
/// of the server's blank-title rejection.
pub fn can_add(input: &str) -> bool {
    !input.trim().is_empty()
}
