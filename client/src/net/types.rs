//! Wire DTOs shared with the Orbi backend.
//!
//! DESIGN
//! ======
//! Field names and casing mirror the backend's Java DTOs (`LocationDto`,
//! `RouteResponseDto`, `DeliveryDto`) exactly so serde round-trips stay
//! lossless against the existing service.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

// =============================================================================
// SUBMISSION SIDE
// =============================================================================

/// One delivery destination submitted for route optimization
/// (backend `LocationDto`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub recipient_name: String,
    pub recipient_phone: String,
    pub recipient_email: String,
    pub package_details: String,
    /// Driver the batch is tied to; identical across one submission.
    pub driver_id: String,
}

/// Body for `POST /api/auth/login`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body for `POST /api/auth/register`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone_number: String,
}

// =============================================================================
// READ SIDE
// =============================================================================

/// A persisted route as returned by `GET /api/route` and `GET /api/route/{id}`
/// (backend `RouteResponseDto`). Read-only from the client's perspective.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResponse {
    pub id: i64,
    pub driver_id: Option<String>,
    pub driver_name: Option<String>,
    #[serde(default)]
    pub deliveries: Vec<Delivery>,
}

impl RouteResponse {
    /// Sort deliveries ascending by `order`. The backend does not guarantee
    /// array order; the timeline must, so this is the single place it happens.
    pub fn sort_deliveries(&mut self) {
        self.deliveries.sort_by_key(|delivery| delivery.order);
    }
}

/// One stop within a persisted route (backend `DeliveryDto`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub id: i64,
    /// Sequence rank within the route; drives timeline ordering.
    pub order: i64,
    pub status: DeliveryStatus,
    pub recipient_name: String,
    pub dropoff_address: String,
    #[serde(default)]
    pub package_details: String,
    pub recipient_phone: Option<String>,
    pub recipient_email: Option<String>,
}

/// Delivery lifecycle status — closed enumeration owned by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryStatus {
    Requested,
    Accepted,
    AtPickup,
    InTransit,
    Delivered,
    Cancelled,
}

/// Cosmetic display treatment for a status badge. Fixed lookup, no business
/// meaning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Success,
    Danger,
    Info,
    Warning,
    Neutral,
}

impl DeliveryStatus {
    /// Wire representation, also used as the badge label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Requested => "REQUESTED",
            Self::Accepted => "ACCEPTED",
            Self::AtPickup => "AT_PICKUP",
            Self::InTransit => "IN_TRANSIT",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Display tone for the status badge.
    pub fn tone(self) -> StatusTone {
        match self {
            Self::Delivered => StatusTone::Success,
            Self::Cancelled => StatusTone::Danger,
            Self::InTransit => StatusTone::Info,
            Self::AtPickup => StatusTone::Warning,
            Self::Requested | Self::Accepted => StatusTone::Neutral,
        }
    }
}
