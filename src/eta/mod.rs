//! Delivery ETA estimation
//!
//! Order placement asks an estimator for the travel time to a delivery
//! address. Estimation is strictly best-effort: the estimator never fails
//! across this boundary, it either produces an estimate or `None`.

pub mod open_route;

pub use open_route::{OpenRouteServiceConfig, OpenRouteServiceEstimator};

use async_trait::async_trait;
use chrono::Duration;

use crate::domain::DeliveryAddress;

/// Estimated travel time from the restaurant to a delivery address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryEstimate {
    pub travel_time: Duration,
}

#[async_trait]
pub trait DeliveryEtaEstimator: Send + Sync {
    /// `None` covers every failure mode: unreachable service, unknown
    /// address, malformed response.
    async fn estimate(&self, address: &DeliveryAddress) -> Option<DeliveryEstimate>;
}

/// Estimator used when no routing backend is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEstimator;

#[async_trait]
impl DeliveryEtaEstimator for NoopEstimator {
    async fn estimate(&self, _address: &DeliveryAddress) -> Option<DeliveryEstimate> {
        None
    }
}
