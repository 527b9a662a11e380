//! Order filtering and aggregate statistics
//!
//! `OrderFilter` fields are AND-combined; an absent field imposes no
//! constraint. Statistics are computed over the full order collection.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::order::Order;
use super::status::{OrderStatus, OrderType};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub order_type: Option<OrderType>,
    pub assigned_courier_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
}

impl OrderFilter {
    pub fn matches(&self, order: &Order) -> bool {
        if let Some(status) = self.status
            && order.status() != status
        {
            return false;
        }
        if let Some(order_type) = self.order_type
            && order.order_type() != order_type
        {
            return false;
        }
        if let Some(courier_id) = self.assigned_courier_id
            && order.assignment().map(|a| a.courier_id()) != Some(courier_id)
        {
            return false;
        }
        if let Some(customer_id) = self.customer_id
            && order.customer_id() != customer_id
        {
            return false;
        }
        true
    }
}

/// Aggregate order statistics for the admin dashboard.
///
/// `delivered_today` counts delivered orders created within
/// `[today_start, tomorrow_start)` UTC. `total_revenue` sums revenue over ALL
/// delivered orders, not just today's; the apparent mismatch with
/// `delivered_today` is the documented historical behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatistics {
    pub total_orders: usize,
    pub total_pickup_orders: usize,
    pub total_delivery_orders: usize,
    pub delivered_today: usize,
    pub total_revenue: Decimal,
}

impl OrderStatistics {
    pub fn compute<'a>(orders: impl IntoIterator<Item = &'a Order>, now: DateTime<Utc>) -> Self {
        let today_start = now
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .expect("midnight is always a valid time")
            .and_utc();
        let tomorrow_start = today_start + chrono::Duration::days(1);

        let mut stats = Self {
            total_orders: 0,
            total_pickup_orders: 0,
            total_delivery_orders: 0,
            delivered_today: 0,
            total_revenue: Decimal::ZERO,
        };

        for order in orders {
            stats.total_orders += 1;
            match order.order_type() {
                OrderType::Pickup => stats.total_pickup_orders += 1,
                OrderType::Delivery => stats.total_delivery_orders += 1,
            }
            if order.status() == OrderStatus::Delivered {
                stats.total_revenue += order.total();
                if order.created_at() >= today_start && order.created_at() < tomorrow_start {
                    stats.delivered_today += 1;
                }
            }
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::domain::order::{DeliveryAddress, OrderItem};

    fn item(price: Decimal, quantity: u32) -> OrderItem {
        OrderItem::new(Uuid::new_v4(), "Item", price, quantity, None).unwrap()
    }

    fn address() -> DeliveryAddress {
        DeliveryAddress::new("1 Main St", "Springfield", "12345", None, None).unwrap()
    }

    fn order(order_type: OrderType, created_at: DateTime<Utc>, price: Decimal) -> Order {
        let addr = (order_type == OrderType::Delivery).then(address);
        Order::create(Uuid::new_v4(), order_type, vec![item(price, 1)], addr, created_at).unwrap()
    }

    fn delivered(created_at: DateTime<Utc>, price: Decimal) -> Order {
        let mut o = order(OrderType::Delivery, created_at, price);
        o.assign_courier(Uuid::new_v4(), created_at).unwrap();
        o.change_status(OrderStatus::Preparing, created_at).unwrap();
        o.change_status(OrderStatus::ReadyForDelivery, created_at).unwrap();
        o.change_status(OrderStatus::OutForDelivery, created_at).unwrap();
        o.change_status(OrderStatus::Delivered, created_at).unwrap();
        o
    }

    #[test]
    fn absent_fields_impose_no_constraint() {
        let o = order(OrderType::Pickup, Utc::now(), dec!(5));
        assert!(OrderFilter::default().matches(&o));
    }

    #[test]
    fn fields_are_and_combined() {
        let now = Utc::now();
        let courier = Uuid::new_v4();
        let mut o = order(OrderType::Delivery, now, dec!(5));
        o.assign_courier(courier, now).unwrap();

        let matching = OrderFilter {
            status: Some(OrderStatus::Pending),
            order_type: Some(OrderType::Delivery),
            assigned_courier_id: Some(courier),
            customer_id: Some(o.customer_id()),
        };
        assert!(matching.matches(&o));

        let wrong_courier = OrderFilter {
            assigned_courier_id: Some(Uuid::new_v4()),
            ..matching
        };
        assert!(!wrong_courier.matches(&o));

        let wrong_status = OrderFilter {
            status: Some(OrderStatus::Preparing),
            ..matching
        };
        assert!(!wrong_status.matches(&o));
    }

    #[test]
    fn courier_filter_never_matches_unassigned_orders() {
        let o = order(OrderType::Delivery, Utc::now(), dec!(5));
        let filter = OrderFilter {
            assigned_courier_id: Some(Uuid::new_v4()),
            ..Default::default()
        };
        assert!(!filter.matches(&o));
    }

    #[test]
    fn statistics_over_a_mixed_fixture() {
        let now = Utc::now();
        let last_week = now - Duration::days(7);

        // 3 pickup + 7 delivery = 10 orders; 2 delivered today, 2 delivered
        // last week. Revenue sums ALL delivered orders.
        let mut orders = vec![
            order(OrderType::Pickup, now, dec!(4.00)),
            order(OrderType::Pickup, now, dec!(4.00)),
            order(OrderType::Pickup, last_week, dec!(4.00)),
            order(OrderType::Delivery, now, dec!(9.00)),
            order(OrderType::Delivery, last_week, dec!(9.00)),
            order(OrderType::Delivery, last_week, dec!(9.00)),
        ];
        orders.push(delivered(now, dec!(10.00)));
        orders.push(delivered(now, dec!(12.50)));
        orders.push(delivered(last_week, dec!(20.00)));
        orders.push(delivered(last_week, dec!(7.50)));

        let stats = OrderStatistics::compute(orders.iter(), now);
        assert_eq!(stats.total_orders, 10);
        assert_eq!(stats.total_pickup_orders, 3);
        assert_eq!(stats.total_delivery_orders, 7);
        assert_eq!(stats.delivered_today, 2);
        assert_eq!(stats.total_revenue, dec!(50.00));
    }
}
