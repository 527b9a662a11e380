//! Courier assignment and delivery milestones for a delivery order.
//!
//! Immutable value type: every `mark_*` operation returns a new instance with
//! one more timestamp set. Marking an already-set milestone is idempotent and
//! returns the value unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::{DomainError, DomainResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentInfo {
    courier_id: Uuid,
    assigned_at: DateTime<Utc>,
    out_for_delivery_at: Option<DateTime<Utc>>,
    delivered_at: Option<DateTime<Utc>>,
    unable_to_deliver_at: Option<DateTime<Utc>>,
}

impl AssignmentInfo {
    pub fn new(courier_id: Uuid, now: DateTime<Utc>) -> DomainResult<Self> {
        if courier_id.is_nil() {
            return Err(DomainError::validation(
                "Assignment.CourierIdRequired",
                "CourierId is required.",
            ));
        }
        Ok(Self {
            courier_id,
            assigned_at: now,
            out_for_delivery_at: None,
            delivered_at: None,
            unable_to_deliver_at: None,
        })
    }

    pub fn courier_id(&self) -> Uuid {
        self.courier_id
    }

    pub fn assigned_at(&self) -> DateTime<Utc> {
        self.assigned_at
    }

    pub fn out_for_delivery_at(&self) -> Option<DateTime<Utc>> {
        self.out_for_delivery_at
    }

    pub fn delivered_at(&self) -> Option<DateTime<Utc>> {
        self.delivered_at
    }

    pub fn unable_to_deliver_at(&self) -> Option<DateTime<Utc>> {
        self.unable_to_deliver_at
    }

    /// Record the out-for-delivery milestone.
    pub fn mark_out_for_delivery(&self, now: DateTime<Utc>) -> DomainResult<Self> {
        if self.out_for_delivery_at.is_some() {
            return Ok(self.clone());
        }
        if now < self.assigned_at {
            return Err(DomainError::validation(
                "Assignment.OutBeforeAssigned",
                "OutForDeliveryAt cannot be before AssignedAt.",
            ));
        }
        Ok(Self {
            out_for_delivery_at: Some(now),
            ..self.clone()
        })
    }

    /// Record the delivered milestone; requires out-for-delivery to be set.
    pub fn mark_delivered(&self, now: DateTime<Utc>) -> DomainResult<Self> {
        if self.delivered_at.is_some() {
            return Ok(self.clone());
        }
        let Some(out_at) = self.out_for_delivery_at else {
            return Err(DomainError::validation(
                "Assignment.DeliveredBeforeOut",
                "Cannot mark Delivered before OutForDelivery.",
            ));
        };
        if now < out_at {
            return Err(DomainError::validation(
                "Assignment.DeliveredBeforeOutTime",
                "DeliveredAt cannot be before OutForDeliveryAt.",
            ));
        }
        Ok(Self {
            delivered_at: Some(now),
            ..self.clone()
        })
    }

    /// Record the unable-to-deliver milestone; requires out-for-delivery to be set.
    pub fn mark_unable_to_deliver(&self, now: DateTime<Utc>) -> DomainResult<Self> {
        if self.unable_to_deliver_at.is_some() {
            return Ok(self.clone());
        }
        let Some(out_at) = self.out_for_delivery_at else {
            return Err(DomainError::validation(
                "Assignment.UnableBeforeOut",
                "Cannot mark UnableToDeliver before OutForDelivery.",
            ));
        };
        if now < out_at {
            return Err(DomainError::validation(
                "Assignment.UnableBeforeOutTime",
                "UnableToDeliverAt cannot be before OutForDeliveryAt.",
            ));
        }
        Ok(Self {
            unable_to_deliver_at: Some(now),
            ..self.clone()
        })
    }
}
