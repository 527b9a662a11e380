//! Auto-assignment scheduler
//!
//! Periodically pushes unassigned delivery orders to the available couriers.
//! Registered as `TaskKind::Periodic` in `start_background_tasks()`. The run
//! loop is the one place that must catch and log assignment failures; a run
//! with no couriers on shift is routine, not a crash.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::app::{AppContext, orders};

pub struct AutoAssignScheduler {
    ctx: AppContext,
    interval: Duration,
    max_orders: usize,
    shutdown: CancellationToken,
}

impl AutoAssignScheduler {
    pub fn new(
        ctx: AppContext,
        interval: Duration,
        max_orders: usize,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            ctx,
            interval,
            max_orders,
            shutdown,
        }
    }

    pub async fn run(self) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            max_orders = self.max_orders,
            "Auto-assign scheduler started"
        );

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    break;
                }
                _ = tokio::time::sleep(self.interval) => {
                    self.run_once().await;
                }
            }
        }

        tracing::info!("Auto-assign scheduler stopped");
    }

    async fn run_once(&self) {
        match orders::auto_assign_orders(&self.ctx, self.max_orders).await {
            Ok(assigned) if assigned.is_empty() => {
                tracing::debug!("Auto-assign run found no candidate orders");
            }
            Ok(assigned) => {
                tracing::info!(count = assigned.len(), "Auto-assign run assigned orders");
            }
            Err(e) => {
                tracing::warn!("Auto-assign run failed: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use super::*;
    use crate::app::test_context;
    use crate::domain::{Customer, MenuItem, Staff, StaffRole};
    use crate::store::{MemoryStore, OrderStore};

    // A failing run must not take the loop down with it.
    #[tokio::test]
    async fn scheduler_survives_runs_without_couriers() {
        let ctx = test_context(MemoryStore::new());
        let shutdown = CancellationToken::new();
        let scheduler = AutoAssignScheduler::new(
            ctx,
            Duration::from_millis(5),
            5,
            shutdown.clone(),
        );

        let handle = tokio::spawn(scheduler.run());
        tokio::time::sleep(Duration::from_millis(30)).await;
        shutdown.cancel();
        handle.await.expect("scheduler task panicked");
    }

    #[tokio::test]
    async fn scheduler_assigns_pending_orders() {
        let store = MemoryStore::new();
        let customer_id = Uuid::new_v4();
        store.seed_customer(Customer {
            id: customer_id,
            name: "Ada".to_string(),
            phone_number: "555-0100".to_string(),
            email: "ada@example.com".to_string(),
        });
        let item = MenuItem::create("Margherita", dec!(8.50), "Pizza", true).unwrap();
        let item_id = item.id();
        store.seed_menu_item(item);
        store.seed_staff(Staff::create("Alice", StaffRole::Delivery, true).unwrap());

        let ctx = test_context(store);
        let customer = crate::auth::CurrentActor::authenticated(customer_id, crate::auth::Role::Customer);
        let order = crate::app::orders::place_order(
            &ctx,
            &customer,
            crate::app::orders::NewOrderRequest {
                order_type: crate::domain::OrderType::Delivery,
                items: vec![crate::app::orders::NewOrderItem {
                    menu_item_id: item_id,
                    quantity: 1,
                    notes: None,
                }],
                delivery_address: Some(crate::app::orders::NewDeliveryAddress {
                    street: "1 Main St".to_string(),
                    city: "Springfield".to_string(),
                    zip: "12345".to_string(),
                    ..Default::default()
                }),
            },
        )
        .await
        .unwrap();

        let shutdown = CancellationToken::new();
        let orders_store: Arc<dyn OrderStore> = ctx.orders.clone();
        let scheduler = AutoAssignScheduler::new(
            ctx,
            Duration::from_millis(5),
            5,
            shutdown.clone(),
        );
        let handle = tokio::spawn(scheduler.run());
        tokio::time::sleep(Duration::from_millis(50)).await;
        shutdown.cancel();
        handle.await.expect("scheduler task panicked");

        let assigned = orders_store.get_by_id(order.id()).await.unwrap().unwrap();
        assert!(assigned.assignment().is_some());
    }
}
