// Session Manager: identity, screen and dashboard state for one user.
// Remote calls go through `ResumeService`; all state changes go through `reduce`.

pub mod manager;
pub mod state;

pub use manager::Session;
pub use state::{Action, AuthMode};
