//! Draft stop list for route submission.
//!
//! DESIGN
//! ======
//! One optimization call in flight at a time: `begin_optimize` freezes a
//! snapshot of the stop list and sets a pending flag that rejects every
//! further mutation until the caller settles the call, so the posted batch
//! can never race the list it was taken from. The server's reordered result
//! replaces the local list wholesale; failures leave it untouched.

#[cfg(test)]
#[path = "draft_test.rs"]
mod draft_test;

use crate::net::api::BearerToken;
use crate::net::types::Stop;

/// Optimization is only meaningful with at least this many stops.
pub const MIN_STOPS: usize = 2;

/// Draft mutation failures, all raised before any network traffic.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("add at least 2 stops")]
    NotEnoughStops,

    #[error("an optimization is already in progress")]
    OptimizePending,

    #[error("stop index {0} is out of range")]
    IndexOutOfRange(usize),

    /// All stops in one batch must carry the same driver id.
    #[error("all stops in one batch must share one driver")]
    DriverMismatch,

    /// No bearer token available; the user has to log in again.
    #[error("session expired, log in again")]
    MissingToken,
}

/// In-memory ordered stop list backing the create-route view.
#[derive(Clone, Debug, Default)]
pub struct DraftRoute {
    stops: Vec<Stop>,
    pending: bool,
}

impl DraftRoute {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Whether an optimize call is currently in flight.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Append a stop. No dedup; position is submission order.
    ///
    /// # Errors
    ///
    /// [`DraftError::OptimizePending`] while a call is in flight,
    /// [`DraftError::DriverMismatch`] when the stop's driver differs from the
    /// batch's.
    pub fn add_stop(&mut self, stop: Stop) -> Result<(), DraftError> {
        if self.pending {
            return Err(DraftError::OptimizePending);
        }
        if let Some(first) = self.stops.first() {
            if first.driver_id != stop.driver_id {
                return Err(DraftError::DriverMismatch);
            }
        }
        self.stops.push(stop);
        Ok(())
    }

    /// Remove the stop at `index`.
    ///
    /// # Errors
    ///
    /// [`DraftError::OptimizePending`] while a call is in flight,
    /// [`DraftError::IndexOutOfRange`] for a bad position.
    pub fn remove_stop(&mut self, index: usize) -> Result<Stop, DraftError> {
        if self.pending {
            return Err(DraftError::OptimizePending);
        }
        if index >= self.stops.len() {
            return Err(DraftError::IndexOutOfRange(index));
        }
        Ok(self.stops.remove(index))
    }

    /// Check preconditions, mark the draft pending, and return the frozen
    /// snapshot to POST. The caller must settle with
    /// [`DraftRoute::complete_optimize`] or [`DraftRoute::fail_optimize`].
    ///
    /// # Errors
    ///
    /// [`DraftError::OptimizePending`], [`DraftError::NotEnoughStops`] (no
    /// network call is made), or [`DraftError::MissingToken`].
    pub fn begin_optimize(&mut self, token: Option<&BearerToken>) -> Result<Vec<Stop>, DraftError> {
        if self.pending {
            return Err(DraftError::OptimizePending);
        }
        if self.stops.len() < MIN_STOPS {
            return Err(DraftError::NotEnoughStops);
        }
        if token.is_none() {
            return Err(DraftError::MissingToken);
        }
        self.pending = true;
        Ok(self.stops.clone())
    }

    /// Adopt the server's reordered batch as the new source of truth.
    pub fn complete_optimize(&mut self, reordered: Vec<Stop>) {
        tracing::debug!(stops = reordered.len(), "optimized route accepted");
        self.stops = reordered;
        self.pending = false;
    }

    /// Settle a failed call. The local list stays exactly as posted.
    pub fn fail_optimize(&mut self) {
        self.pending = false;
    }
}
