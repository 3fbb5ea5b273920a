//! # API Module
//!
//! HTTP endpoints served by the local callback listener while an
//! authorization attempt is in flight.
//!
//! ## Endpoints
//!
//! - [`callback`] - Receives the implicit-grant redirect. Spotify puts the
//!   token in the URL fragment, which never reaches a server, so a bare hit
//!   on the redirect path answers with a relay page that re-requests the
//!   same path with the fragment moved into the query string.
//!
//! Every other path falls through to axum's default 404 and leaves the
//! session untouched.
//!
//! ## Related Modules
//!
//! - [`crate::server`] - Owns the listener and the session state
//! - [`crate::types`] - [`crate::types::CallbackOutcome`]

mod callback;

pub use callback::callback;
