//! Order use cases
//!
//! Placement, lookup, status changes, courier assignment and the
//! auto-assignment batch that the scheduler drives.

use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::{CurrentActor, policy};
use crate::domain::{
    DeliveryAddress, Order, OrderFilter, OrderItem, OrderStatus, OrderType, Staff, StaffRole,
};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, check_optional_text, require_text,
};
use crate::utils::{AppError, AppResult};

use super::AppContext;

// ========== Requests ==========

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderItem {
    pub menu_item_id: Uuid,
    pub quantity: u32,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewDeliveryAddress {
    pub street: String,
    pub city: String,
    pub zip: String,
    pub line2: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderRequest {
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub items: Vec<NewOrderItem>,
    pub delivery_address: Option<NewDeliveryAddress>,
}

impl NewOrderRequest {
    /// Collect every field problem before the operation runs.
    fn validate(&self) -> AppResult<()> {
        let mut errors = Vec::new();

        if self.items.is_empty() {
            errors.push("At least one item is required".to_string());
        }
        for (i, item) in self.items.iter().enumerate() {
            if item.menu_item_id.is_nil() {
                errors.push(format!("items[{i}].menu_item_id must not be empty"));
            }
            if item.quantity == 0 {
                errors.push(format!("items[{i}].quantity must be greater than zero"));
            }
            check_optional_text(
                item.notes.as_deref(),
                &format!("items[{i}].notes"),
                MAX_NOTE_LEN,
                &mut errors,
            );
        }

        match (self.order_type, &self.delivery_address) {
            (OrderType::Delivery, None) => {
                errors.push("Delivery address is required for delivery orders".to_string());
            }
            (OrderType::Delivery, Some(addr)) => {
                require_text(&addr.street, "delivery_address.street", MAX_ADDRESS_LEN, &mut errors);
                require_text(&addr.city, "delivery_address.city", MAX_NAME_LEN, &mut errors);
                require_text(&addr.zip, "delivery_address.zip", MAX_NAME_LEN, &mut errors);
                check_optional_text(
                    addr.line2.as_deref(),
                    "delivery_address.line2",
                    MAX_ADDRESS_LEN,
                    &mut errors,
                );
                check_optional_text(
                    addr.country.as_deref(),
                    "delivery_address.country",
                    MAX_NAME_LEN,
                    &mut errors,
                );
            }
            (OrderType::Pickup, _) => {}
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::validation(errors.join("; ")))
        }
    }
}

// ========== Use cases ==========

/// Place a new order for the calling customer. Item names and prices are
/// copied from the menu at placement time; delivery orders get a
/// best-effort travel-time estimate.
pub async fn place_order(
    ctx: &AppContext,
    actor: &CurrentActor,
    request: NewOrderRequest,
) -> AppResult<Order> {
    let customer_id = policy::ensure_customer_places_order(actor)?;
    request.validate()?;

    if !ctx.customers.exists(customer_id).await? {
        return Err(AppError::not_found(format!("Customer {customer_id}")));
    }

    let mut items = Vec::with_capacity(request.items.len());
    for item in &request.items {
        let menu_item = ctx
            .menu
            .get_by_id(item.menu_item_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Menu item {}", item.menu_item_id)))?;
        items.push(OrderItem::new(
            menu_item.id(),
            menu_item.name(),
            menu_item.price(),
            item.quantity,
            item.notes.clone(),
        )?);
    }

    let delivery_address = match (request.order_type, request.delivery_address) {
        (OrderType::Delivery, Some(addr)) => Some(DeliveryAddress::new(
            addr.street,
            addr.city,
            addr.zip,
            addr.line2,
            addr.country,
        )?),
        _ => None,
    };

    let mut order = Order::create(
        customer_id,
        request.order_type,
        items,
        delivery_address,
        Utc::now(),
    )?;

    if let Some(address) = order.delivery_address().cloned() {
        match ctx.eta.estimate(&address).await {
            Some(estimate) => order.set_delivery_time_needed(estimate.travel_time)?,
            None => tracing::warn!(order_id = %order.id(), "no delivery estimate available"),
        }
    }

    ctx.orders.add(order.clone()).await?;
    ctx.unit_of_work.commit().await?;

    tracing::info!(order_id = %order.id(), order_type = %order.order_type(), "order placed");
    Ok(order)
}

pub async fn get_order(ctx: &AppContext, actor: &CurrentActor, id: Uuid) -> AppResult<Order> {
    let order = ctx
        .orders
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {id}")))?;
    policy::ensure_can_view_order(actor, &order)?;
    Ok(order)
}

pub async fn list_orders(
    ctx: &AppContext,
    actor: &CurrentActor,
    requested: OrderFilter,
    max_results: Option<usize>,
) -> AppResult<Vec<Order>> {
    let filter = policy::scoped_list_filter(actor, requested)?;
    Ok(ctx.orders.get_by_filter(&filter, max_results).await?)
}

pub async fn update_status(
    ctx: &AppContext,
    actor: &CurrentActor,
    id: Uuid,
    target: OrderStatus,
) -> AppResult<Order> {
    let mut order = ctx
        .orders
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {id}")))?;

    policy::ensure_can_update_status(actor, &order, target)?;
    order.change_status(target, Utc::now())?;

    ctx.orders.update(order.clone()).await?;
    ctx.unit_of_work.commit().await?;

    tracing::info!(order_id = %id, status = %order.status(), "order status updated");
    Ok(order)
}

/// Assign a courier to a delivery order. The staff member must exist, be
/// active and hold the delivery role.
pub async fn assign_courier(
    ctx: &AppContext,
    actor: &CurrentActor,
    order_id: Uuid,
    courier_id: Uuid,
) -> AppResult<Order> {
    policy::ensure_can_assign_courier(actor)?;

    let mut order = ctx
        .orders
        .get_by_id(order_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {order_id}")))?;
    let courier = ctx
        .staff
        .get_by_id(courier_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Staff {courier_id}")))?;

    check_courier(&courier)?;
    order.assign_courier(courier.id(), Utc::now())?;

    ctx.orders.update(order.clone()).await?;
    ctx.unit_of_work.commit().await?;

    tracing::info!(order_id = %order_id, courier_id = %courier_id, "courier assigned");
    Ok(order)
}

/// The calling courier's in-flight deliveries.
pub async fn my_deliveries(ctx: &AppContext, actor: &CurrentActor) -> AppResult<Vec<Order>> {
    let filter = policy::delivery_assignments_filter(actor)?;
    Ok(ctx.orders.get_by_filter(&filter, None).await?)
}

fn check_courier(staff: &Staff) -> AppResult<()> {
    if staff.role() != StaffRole::Delivery {
        return Err(AppError::business_rule(
            "Staff member is not a delivery courier.",
        ));
    }
    if !staff.is_active() {
        return Err(AppError::business_rule(
            "Cannot assign order to an inactive courier.",
        ));
    }
    Ok(())
}

// ========== Auto-assignment ==========

/// One assignment made by an auto-assignment run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignedOrder {
    pub order_id: Uuid,
    pub courier_id: Uuid,
}

/// Distribute unassigned delivery orders round-robin across the active
/// couriers, oldest orders first, up to `max_orders` per run. All updates
/// from one run are committed together; with zero available couriers the
/// run fails without persisting anything.
pub async fn auto_assign_orders(
    ctx: &AppContext,
    max_orders: usize,
) -> AppResult<Vec<AssignedOrder>> {
    let couriers = ctx.staff.get_available_couriers().await?;
    if couriers.is_empty() {
        return Err(AppError::business_rule(
            "No available delivery couriers to assign orders to.",
        ));
    }

    let candidates = ctx.orders.pending_assignment(max_orders).await?;
    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    let now = Utc::now();
    let mut assigned = Vec::new();
    let mut courier_idx = 0usize;

    for candidate in candidates {
        // The order may have gained an assignment between fetch and
        // processing; re-read and skip it rather than overwrite.
        let Some(mut order) = ctx.orders.get_by_id(candidate.id()).await? else {
            continue;
        };
        if order.assignment().is_some() {
            continue;
        }

        let courier = &couriers[courier_idx % couriers.len()];
        match order.assign_courier(courier.id(), now) {
            Ok(()) => {
                ctx.orders.update(order.clone()).await?;
                assigned.push(AssignedOrder {
                    order_id: order.id(),
                    courier_id: courier.id(),
                });
                courier_idx += 1;
            }
            Err(e) => {
                tracing::warn!(order_id = %order.id(), error = %e, "skipping unassignable order");
            }
        }
    }

    ctx.unit_of_work.commit().await?;
    Ok(assigned)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::app::test_context;
    use crate::auth::Role;
    use crate::domain::{Customer, MenuItem};
    use crate::store::MemoryStore;

    fn seeded_store() -> (MemoryStore, Uuid, Uuid) {
        let store = MemoryStore::new();
        let customer_id = Uuid::new_v4();
        store.seed_customer(Customer {
            id: customer_id,
            name: "Ada".to_string(),
            phone_number: "555-0100".to_string(),
            email: "ada@example.com".to_string(),
        });
        let menu_item = MenuItem::create("Margherita", dec!(8.50), "Pizza", true).unwrap();
        let menu_item_id = menu_item.id();
        store.seed_menu_item(menu_item);
        (store, customer_id, menu_item_id)
    }

    fn delivery_request(menu_item_id: Uuid, quantity: u32) -> NewOrderRequest {
        NewOrderRequest {
            order_type: OrderType::Delivery,
            items: vec![NewOrderItem {
                menu_item_id,
                quantity,
                notes: None,
            }],
            delivery_address: Some(NewDeliveryAddress {
                street: "1 Main St".to_string(),
                city: "Springfield".to_string(),
                zip: "12345".to_string(),
                ..NewDeliveryAddress::default()
            }),
        }
    }

    #[tokio::test]
    async fn place_order_copies_menu_prices() {
        let (store, customer_id, menu_item_id) = seeded_store();
        let ctx = test_context(store);
        let actor = CurrentActor::authenticated(customer_id, Role::Customer);

        let order = place_order(&ctx, &actor, delivery_request(menu_item_id, 2))
            .await
            .unwrap();

        assert_eq!(order.customer_id(), customer_id);
        assert_eq!(order.items()[0].name(), "Margherita");
        assert_eq!(order.total(), dec!(17.00));
        // Visible through the store after commit
        assert!(ctx.orders.get_by_id(order.id()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn place_order_rejects_unknown_customer_and_menu_item() {
        let (store, customer_id, menu_item_id) = seeded_store();
        let ctx = test_context(store);

        let stranger = CurrentActor::authenticated(Uuid::new_v4(), Role::Customer);
        let err = place_order(&ctx, &stranger, delivery_request(menu_item_id, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let actor = CurrentActor::authenticated(customer_id, Role::Customer);
        let err = place_order(&ctx, &actor, delivery_request(Uuid::new_v4(), 1))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn place_order_reports_all_field_errors_at_once() {
        let (store, customer_id, _) = seeded_store();
        let ctx = test_context(store);
        let actor = CurrentActor::authenticated(customer_id, Role::Customer);

        let request = NewOrderRequest {
            order_type: OrderType::Delivery,
            items: vec![NewOrderItem {
                menu_item_id: Uuid::nil(),
                quantity: 0,
                notes: None,
            }],
            delivery_address: None,
        };
        let err = place_order(&ctx, &actor, request).await.unwrap_err();
        let AppError::Validation(message) = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert!(message.contains("menu_item_id"));
        assert!(message.contains("quantity"));
        assert!(message.contains("Delivery address is required"));
    }

    #[tokio::test]
    async fn assign_courier_rejects_inactive_and_non_courier_staff() {
        let (store, customer_id, menu_item_id) = seeded_store();
        let inactive = Staff::create("Bob", StaffRole::Delivery, false).unwrap();
        let chef = Staff::create("Carol", StaffRole::Kitchen, true).unwrap();
        let inactive_id = inactive.id();
        let chef_id = chef.id();
        store.seed_staff(inactive);
        store.seed_staff(chef);

        let ctx = test_context(store);
        let customer = CurrentActor::authenticated(customer_id, Role::Customer);
        let order = place_order(&ctx, &customer, delivery_request(menu_item_id, 1))
            .await
            .unwrap();

        let kitchen = CurrentActor::authenticated(Uuid::new_v4(), Role::Kitchen);
        for staff_id in [inactive_id, chef_id] {
            let err = assign_courier(&ctx, &kitchen, order.id(), staff_id)
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::BusinessRule(_)));
        }
    }

    #[tokio::test]
    async fn auto_assign_distributes_round_robin() {
        let (store, customer_id, menu_item_id) = seeded_store();
        // Name order decides courier order: Alice, Bob
        let alice = Staff::create("Alice", StaffRole::Delivery, true).unwrap();
        let bob = Staff::create("Bob", StaffRole::Delivery, true).unwrap();
        let alice_id = alice.id();
        let bob_id = bob.id();
        store.seed_staff(alice);
        store.seed_staff(bob);

        let ctx = test_context(store);
        let customer = CurrentActor::authenticated(customer_id, Role::Customer);
        let mut order_ids = Vec::new();
        for _ in 0..5 {
            let order = place_order(&ctx, &customer, delivery_request(menu_item_id, 1))
                .await
                .unwrap();
            order_ids.push(order.id());
        }

        let assigned = auto_assign_orders(&ctx, 5).await.unwrap();
        assert_eq!(assigned.len(), 5);
        let couriers: Vec<Uuid> = assigned.iter().map(|a| a.courier_id).collect();
        assert_eq!(couriers, [alice_id, bob_id, alice_id, bob_id, alice_id]);

        // Assignments are persisted
        for a in &assigned {
            let order = ctx.orders.get_by_id(a.order_id).await.unwrap().unwrap();
            assert_eq!(order.assignment().unwrap().courier_id(), a.courier_id);
        }
    }

    #[tokio::test]
    async fn auto_assign_without_couriers_persists_nothing() {
        let (store, customer_id, menu_item_id) = seeded_store();
        let ctx = test_context(store.clone());
        let customer = CurrentActor::authenticated(customer_id, Role::Customer);
        let order = place_order(&ctx, &customer, delivery_request(menu_item_id, 1))
            .await
            .unwrap();

        let err = auto_assign_orders(&ctx, 5).await.unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(_)));
        assert_eq!(store.staged_count(), 0);

        let unchanged = ctx.orders.get_by_id(order.id()).await.unwrap().unwrap();
        assert!(unchanged.assignment().is_none());
    }

    #[tokio::test]
    async fn auto_assign_with_no_candidates_is_empty() {
        let (store, _, _) = seeded_store();
        store.seed_staff(Staff::create("Alice", StaffRole::Delivery, true).unwrap());
        let ctx = test_context(store);

        let assigned = auto_assign_orders(&ctx, 5).await.unwrap();
        assert!(assigned.is_empty());
    }
}
