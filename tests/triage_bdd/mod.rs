//! Support modules for the triage BDD tests.

#[path = "../support/mock_github.rs"]
pub(crate) mod mock_github;
pub(crate) mod state;

pub(crate) use state::{TriageState, mount, posted_bodies, run_analysis};
