//! HTTP client for the DreamSpace backend.
//!
//! The backend owns projects, uploaded images, generated design variants and
//! the items detected in each variant. This crate exposes it through two
//! narrow async traits, [`ProjectService`] and [`ItemService`], so editing
//! sessions can run against the real [`ApiClient`] or an in-memory mock.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`client`] | reqwest implementation, auth endpoints, refresh-once retry |
//! | [`service`] | The service traits sessions depend on |
//! | [`types`] | Wire types (serde) |
//! | [`auth`] | Shared access/refresh token pair |
//! | [`config`] | Base URL and timeouts from the environment |
//! | [`error`] | [`ApiError`] and its error codes |

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod service;
pub mod types;

pub use auth::TokenStore;
pub use client::ApiClient;
pub use config::ApiConfig;
pub use error::ApiError;
pub use service::{ItemService, ProjectService};
