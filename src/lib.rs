//! DreamSpace editing sessions.
//!
//! An [`EditingSession`] binds one backend project to the two editing
//! surfaces from the `editor` crate (2D canvas and 3D scene). It pulls the
//! project and its design variants through an [`api::ProjectService`],
//! applies uploaded room photos as the surfaces' background, and requests new
//! variants, watching for them with a cancellable [`poll`] task.
//!
//! Editors are owned by the session, never global: dropping the session
//! drops every registry and history with it.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`session`] | Project binding, uploads, variant hydration, teardown on expiry |
//! | [`poll`] | Backoff polling for variants produced by a generation request |
//! | [`convert`] | Mapping between backend item instances and canvas items |
//! | [`config`] | Polling knobs from the environment |
//! | [`error`] | [`SessionError`] |

pub mod config;
pub mod convert;
pub mod error;
pub mod poll;
pub mod session;

#[cfg(test)]
mod testing;

pub use config::{PollConfig, SessionConfig};
pub use error::SessionError;
pub use poll::{PollHandle, PollOutcome, spawn_variant_poll};
pub use session::{EditingSession, SessionState};
