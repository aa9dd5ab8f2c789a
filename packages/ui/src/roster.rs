//! # Roster view state
//!
//! The state behind [`crate::CamperRoster`], kept free of Dioxus so every
//! transition can be exercised directly.
//!
//! ```text
//!            fetch ok (0)          fetch ok (n > 0)
//! Loading ──────────────▶ Empty   Loading ──────────▶ Populated ◀──┐
//!    ▲  │ fetch failed                                    │ edit    │ save ok / cancel
//!    │  ▼                                                 ▼         │
//!    └─ Error ◀── retry                             Populated + editing
//! ```
//!
//! At most one camper is being edited at a time. A failed save leaves the
//! draft in place so the user can try again.

use api::{ClientError, User};

/// Alert raised when a save is rejected or cannot reach the server.
pub const SAVE_FAILED: &str = "Failed to update username. Please try again.";

/// The four states the roster can be observed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterView<'a> {
    Loading,
    Error(&'a str),
    Empty,
    Populated(&'a [User]),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Status {
    Loading,
    Error(String),
    Loaded,
}

/// An in-progress username edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub id: i32,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    status: Status,
    campers: Vec<User>,
    editing: Option<EditDraft>,
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            status: Status::Loading,
            campers: Vec::new(),
            editing: None,
        }
    }
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> RosterView<'_> {
        match &self.status {
            Status::Loading => RosterView::Loading,
            Status::Error(message) => RosterView::Error(message),
            Status::Loaded if self.campers.is_empty() => RosterView::Empty,
            Status::Loaded => RosterView::Populated(&self.campers),
        }
    }

    pub fn campers(&self) -> &[User] {
        &self.campers
    }

    /// A list request is about to be issued (mount or retry).
    pub fn begin_fetch(&mut self) {
        self.status = Status::Loading;
    }

    pub fn fetch_succeeded(&mut self, campers: Vec<User>) {
        self.campers = campers;
        self.status = Status::Loaded;
        if let Some(draft) = &self.editing {
            if !self.campers.iter().any(|c| c.id == draft.id) {
                self.editing = None;
            }
        }
    }

    pub fn fetch_failed(&mut self, message: impl Into<String>) {
        self.status = Status::Error(message.into());
    }

    pub fn editing(&self) -> Option<&EditDraft> {
        self.editing.as_ref()
    }

    pub fn is_editing(&self, id: i32) -> bool {
        self.editing.as_ref().is_some_and(|draft| draft.id == id)
    }

    /// Start editing `id`, replacing any other draft. Ignored unless the
    /// roster is populated and contains that camper.
    pub fn start_edit(&mut self, id: i32) {
        if self.status != Status::Loaded {
            return;
        }
        if let Some(camper) = self.campers.iter().find(|c| c.id == id) {
            self.editing = Some(EditDraft {
                id,
                username: camper.username.clone().unwrap_or_default(),
            });
        }
    }

    pub fn set_draft(&mut self, username: impl Into<String>) {
        if let Some(draft) = &mut self.editing {
            draft.username = username.into();
        }
    }

    /// The `(id, trimmed username)` to send when saving the current draft.
    pub fn save_request(&self) -> Option<(i32, String)> {
        self.editing
            .as_ref()
            .map(|draft| (draft.id, draft.username.trim().to_string()))
    }

    /// Merge the server's record and leave the editing sub-state.
    pub fn save_succeeded(&mut self, updated: User) {
        let id = updated.id;
        if let Some(camper) = self.campers.iter_mut().find(|c| c.id == id) {
            *camper = updated;
        }
        if self.is_editing(id) {
            self.editing = None;
        }
    }

    /// Apply the outcome of a save request. On failure the draft stays open
    /// and the alert to raise is returned.
    pub fn save_finished(&mut self, outcome: Result<User, ClientError>) -> Option<&'static str> {
        match outcome {
            Ok(updated) => {
                self.save_succeeded(updated);
                None
            }
            Err(_) => Some(SAVE_FAILED),
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }
}
