//! Statistics use case

use chrono::Utc;

use crate::auth::{CurrentActor, policy};
use crate::domain::{OrderFilter, OrderStatistics};
use crate::utils::AppResult;

use super::AppContext;

/// Aggregate order statistics, admin-only.
pub async fn order_statistics(
    ctx: &AppContext,
    actor: &CurrentActor,
) -> AppResult<OrderStatistics> {
    policy::ensure_admin(actor, "view statistics")?;

    let orders = ctx
        .orders
        .get_by_filter(&OrderFilter::default(), None)
        .await?;
    Ok(OrderStatistics::compute(&orders, Utc::now()))
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use super::*;
    use crate::app::orders::{NewDeliveryAddress, NewOrderItem, NewOrderRequest, place_order};
    use crate::app::test_context;
    use crate::auth::Role;
    use crate::domain::{Customer, MenuItem, OrderType};
    use crate::store::MemoryStore;
    use crate::utils::AppError;

    #[tokio::test]
    async fn statistics_are_admin_only() {
        let ctx = test_context(MemoryStore::new());
        for role in [Role::Customer, Role::Kitchen, Role::Courier] {
            let actor = CurrentActor::authenticated(Uuid::new_v4(), role);
            let err = order_statistics(&ctx, &actor).await.unwrap_err();
            assert!(matches!(err, AppError::Forbidden(_)));
        }
    }

    #[tokio::test]
    async fn statistics_count_orders_by_type() {
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

        let ctx = test_context(store);
        let customer = CurrentActor::authenticated(customer_id, Role::Customer);
        for order_type in [OrderType::Pickup, OrderType::Delivery, OrderType::Delivery] {
            let address = (order_type == OrderType::Delivery).then(|| NewDeliveryAddress {
                street: "1 Main St".to_string(),
                city: "Springfield".to_string(),
                zip: "12345".to_string(),
                ..NewDeliveryAddress::default()
            });
            place_order(
                &ctx,
                &customer,
                NewOrderRequest {
                    order_type,
                    items: vec![NewOrderItem {
                        menu_item_id: item_id,
                        quantity: 1,
                        notes: None,
                    }],
                    delivery_address: address,
                },
            )
            .await
            .unwrap();
        }

        let admin = CurrentActor::authenticated(Uuid::new_v4(), Role::Admin);
        let stats = order_statistics(&ctx, &admin).await.unwrap();
        assert_eq!(stats.total_orders, 3);
        assert_eq!(stats.total_pickup_orders, 1);
        assert_eq!(stats.total_delivery_orders, 2);
        assert_eq!(stats.total_revenue, dec!(0));
    }
}
