//! This crate contains all shared UI for the workspace.

pub mod roster;
pub use roster::{EditDraft, Roster, RosterView};

mod camper_roster;
pub use camper_roster::CamperRoster;

pub use api::ApiClient;
