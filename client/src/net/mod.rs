//! HTTP edge: wire DTOs, endpoint calls, and the error taxonomy.

pub mod api;
pub mod error;
pub mod types;

pub use api::{ApiClient, BearerToken, Credentials, SessionCookie};
pub use error::{ApiError, ErrorCategory};
pub use types::{Delivery, DeliveryStatus, RouteResponse, Stop};
