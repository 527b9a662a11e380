//! Order status transition rules
//!
//! The transition tables below are the single source of truth for lifecycle
//! legality; no other component may special-case a transition. Same-state
//! "transitions" are not in the tables — callers short-circuit them as no-ops.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Order type, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    Pickup,
    Delivery,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::Pickup => write!(f, "Pickup"),
            OrderType::Delivery => write!(f, "Delivery"),
        }
    }
}

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Preparing,
    ReadyForPickup,
    ReadyForDelivery,
    OutForDelivery,
    Delivered,
    UnableToDeliver,
    Cancelled,
}

impl OrderStatus {
    /// All statuses, for exhaustive table checks in tests.
    pub const ALL: [OrderStatus; 8] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::ReadyForPickup,
        OrderStatus::ReadyForDelivery,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
        OrderStatus::UnableToDeliver,
        OrderStatus::Cancelled,
    ];
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::ReadyForPickup => "ReadyForPickup",
            OrderStatus::ReadyForDelivery => "ReadyForDelivery",
            OrderStatus::OutForDelivery => "OutForDelivery",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::UnableToDeliver => "UnableToDeliver",
            OrderStatus::Cancelled => "Cancelled",
        };
        write!(f, "{s}")
    }
}

// Pickup flow
const PICKUP_TRANSITIONS: &[(OrderStatus, OrderStatus)] = &[
    (OrderStatus::Pending, OrderStatus::Preparing),
    (OrderStatus::Pending, OrderStatus::Cancelled),
    (OrderStatus::Preparing, OrderStatus::ReadyForPickup),
];

// Delivery flow
const DELIVERY_TRANSITIONS: &[(OrderStatus, OrderStatus)] = &[
    (OrderStatus::Pending, OrderStatus::Preparing),
    (OrderStatus::Pending, OrderStatus::Cancelled),
    (OrderStatus::Preparing, OrderStatus::ReadyForDelivery),
    (OrderStatus::ReadyForDelivery, OrderStatus::OutForDelivery),
    (OrderStatus::OutForDelivery, OrderStatus::Delivered),
    (OrderStatus::OutForDelivery, OrderStatus::UnableToDeliver),
];

/// Returns true if the transition is valid for the given order type.
pub fn can_transition(order_type: OrderType, from: OrderStatus, to: OrderStatus) -> bool {
    let table = match order_type {
        OrderType::Pickup => PICKUP_TRANSITIONS,
        OrderType::Delivery => DELIVERY_TRANSITIONS,
    };
    table.contains(&(from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pickup_flow_is_allowed() {
        assert!(can_transition(
            OrderType::Pickup,
            OrderStatus::Pending,
            OrderStatus::Preparing
        ));
        assert!(can_transition(
            OrderType::Pickup,
            OrderStatus::Pending,
            OrderStatus::Cancelled
        ));
        assert!(can_transition(
            OrderType::Pickup,
            OrderStatus::Preparing,
            OrderStatus::ReadyForPickup
        ));
    }

    #[test]
    fn delivery_flow_is_allowed() {
        assert!(can_transition(
            OrderType::Delivery,
            OrderStatus::Pending,
            OrderStatus::Preparing
        ));
        assert!(can_transition(
            OrderType::Delivery,
            OrderStatus::Preparing,
            OrderStatus::ReadyForDelivery
        ));
        assert!(can_transition(
            OrderType::Delivery,
            OrderStatus::ReadyForDelivery,
            OrderStatus::OutForDelivery
        ));
        assert!(can_transition(
            OrderType::Delivery,
            OrderStatus::OutForDelivery,
            OrderStatus::Delivered
        ));
        assert!(can_transition(
            OrderType::Delivery,
            OrderStatus::OutForDelivery,
            OrderStatus::UnableToDeliver
        ));
    }

    #[test]
    fn pickup_orders_never_reach_delivery_states() {
        for from in OrderStatus::ALL {
            for to in [
                OrderStatus::ReadyForDelivery,
                OrderStatus::OutForDelivery,
                OrderStatus::Delivered,
                OrderStatus::UnableToDeliver,
            ] {
                assert!(!can_transition(OrderType::Pickup, from, to));
            }
        }
    }

    #[test]
    fn everything_outside_the_tables_is_rejected() {
        let allowed_pickup = [
            (OrderStatus::Pending, OrderStatus::Preparing),
            (OrderStatus::Pending, OrderStatus::Cancelled),
            (OrderStatus::Preparing, OrderStatus::ReadyForPickup),
        ];
        let allowed_delivery = [
            (OrderStatus::Pending, OrderStatus::Preparing),
            (OrderStatus::Pending, OrderStatus::Cancelled),
            (OrderStatus::Preparing, OrderStatus::ReadyForDelivery),
            (OrderStatus::ReadyForDelivery, OrderStatus::OutForDelivery),
            (OrderStatus::OutForDelivery, OrderStatus::Delivered),
            (OrderStatus::OutForDelivery, OrderStatus::UnableToDeliver),
        ];

        for from in OrderStatus::ALL {
            for to in OrderStatus::ALL {
                assert_eq!(
                    can_transition(OrderType::Pickup, from, to),
                    allowed_pickup.contains(&(from, to)),
                    "pickup {from} -> {to}"
                );
                assert_eq!(
                    can_transition(OrderType::Delivery, from, to),
                    allowed_delivery.contains(&(from, to)),
                    "delivery {from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn same_state_is_not_in_the_table() {
        for status in OrderStatus::ALL {
            assert!(!can_transition(OrderType::Pickup, status, status));
            assert!(!can_transition(OrderType::Delivery, status, status));
        }
    }
}
