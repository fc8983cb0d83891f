//! Typed client for the Orbi delivery/route-management backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! All business logic (authentication, route optimization, persistence) lives
//! in the remote backend. This crate is the front-end's typed edge: wire DTOs
//! matching the backend's Java contracts, one method per endpoint, and the
//! small state machines the views drive — session guard, login/registration
//! flow, draft stop list, and read-side route state. Credentials are explicit
//! parameters, never ambient, and every endpoint call returns a tagged result
//! so the error taxonomy stays machine-checkable.

pub mod net;
pub mod state;
pub mod util;
