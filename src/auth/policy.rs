//! Authorization policy
//!
//! Role-scoped rules applied per operation. Every gated operation treats an
//! anonymous caller as forbidden; there is no separate "unauthenticated"
//! outcome at this layer.

use uuid::Uuid;

use crate::auth::{CurrentActor, Role};
use crate::domain::{Order, OrderFilter, OrderStatus, OrderType};
use crate::utils::{AppError, AppResult};

/// Placing an order is a customer action. Returns the customer id the
/// order must be created under; it is never taken from the request payload.
pub fn ensure_customer_places_order(actor: &CurrentActor) -> AppResult<Uuid> {
    let (user_id, role) = actor.require("place an order")?;
    if role != Role::Customer {
        return Err(AppError::forbidden("Only customers can place orders."));
    }
    Ok(user_id)
}

/// Customer sees only their own orders; couriers only orders assigned to
/// them; kitchen and admin are unrestricted.
pub fn ensure_can_view_order(actor: &CurrentActor, order: &Order) -> AppResult<()> {
    let (user_id, role) = actor.require("view this order")?;
    match role {
        Role::Kitchen | Role::Admin => Ok(()),
        Role::Customer => {
            if order.customer_id() == user_id {
                Ok(())
            } else {
                Err(AppError::forbidden(
                    "Customers can only view their own orders.",
                ))
            }
        }
        Role::Courier => {
            let assigned = order
                .assignment()
                .is_some_and(|a| a.courier_id() == user_id);
            if assigned {
                Ok(())
            } else {
                Err(AppError::forbidden(
                    "Couriers can only view orders assigned to them.",
                ))
            }
        }
    }
}

/// Narrow a list filter to what the caller is allowed to see. Customers and
/// couriers keep only status/type from the request; the id field is forced
/// to their own id and the other id field is dropped. Kitchen and admin
/// filters pass through untouched.
pub fn scoped_list_filter(actor: &CurrentActor, requested: OrderFilter) -> AppResult<OrderFilter> {
    let (user_id, role) = actor.require("list orders")?;
    match role {
        Role::Kitchen | Role::Admin => Ok(requested),
        Role::Customer => Ok(OrderFilter {
            status: requested.status,
            order_type: requested.order_type,
            customer_id: Some(user_id),
            assigned_courier_id: None,
        }),
        Role::Courier => Ok(OrderFilter {
            status: requested.status,
            order_type: requested.order_type,
            assigned_courier_id: Some(user_id),
            customer_id: None,
        }),
    }
}

/// Status-change rules per role:
/// - Admin: unrestricted.
/// - Kitchen: may not set delivery milestones; may cancel only while Pending.
/// - Courier: only Delivery orders assigned to them, only to Delivered or
///   UnableToDeliver.
/// - Customer: never.
pub fn ensure_can_update_status(
    actor: &CurrentActor,
    order: &Order,
    target: OrderStatus,
) -> AppResult<()> {
    let (user_id, role) = actor.require("update the order status")?;
    match role {
        Role::Admin => Ok(()),
        Role::Kitchen => {
            if matches!(
                target,
                OrderStatus::OutForDelivery | OrderStatus::Delivered | OrderStatus::UnableToDeliver
            ) {
                return Err(AppError::forbidden(
                    "Kitchen staff cannot set delivery statuses.",
                ));
            }
            if target == OrderStatus::Cancelled && order.status() != OrderStatus::Pending {
                return Err(AppError::business_rule(
                    "Orders can only be cancelled before preparation starts.",
                ));
            }
            Ok(())
        }
        Role::Courier => {
            if order.order_type() != OrderType::Delivery {
                return Err(AppError::forbidden(
                    "Couriers can only update delivery orders.",
                ));
            }
            let assigned = order
                .assignment()
                .is_some_and(|a| a.courier_id() == user_id);
            if !assigned {
                return Err(AppError::forbidden(
                    "Couriers can only update orders assigned to them.",
                ));
            }
            if !matches!(
                target,
                OrderStatus::Delivered | OrderStatus::UnableToDeliver
            ) {
                return Err(AppError::forbidden(
                    "Couriers can only mark orders delivered or unable to deliver.",
                ));
            }
            Ok(())
        }
        Role::Customer => Err(AppError::forbidden(
            "Customers cannot update order statuses.",
        )),
    }
}

/// Assigning a courier is a kitchen or admin action.
pub fn ensure_can_assign_courier(actor: &CurrentActor) -> AppResult<()> {
    let (_, role) = actor.require("assign a courier")?;
    match role {
        Role::Kitchen | Role::Admin => Ok(()),
        _ => Err(AppError::forbidden(
            "Only kitchen staff or admins can assign couriers.",
        )),
    }
}

/// "My deliveries" is courier-only; the filter is fixed to the caller's
/// in-flight delivery orders regardless of what was requested.
pub fn delivery_assignments_filter(actor: &CurrentActor) -> AppResult<OrderFilter> {
    let (user_id, role) = actor.require("view delivery assignments")?;
    if role != Role::Courier {
        return Err(AppError::forbidden(
            "Only couriers can view delivery assignments.",
        ));
    }
    Ok(OrderFilter {
        assigned_courier_id: Some(user_id),
        status: Some(OrderStatus::OutForDelivery),
        order_type: Some(OrderType::Delivery),
        customer_id: None,
    })
}

pub fn ensure_admin(actor: &CurrentActor, action: &str) -> AppResult<()> {
    let (_, role) = actor.require(action)?;
    if role != Role::Admin {
        return Err(AppError::forbidden(format!(
            "Only admins can {action}."
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::domain::{DeliveryAddress, OrderItem};

    fn actor(role: Role) -> CurrentActor {
        CurrentActor::authenticated(Uuid::new_v4(), role)
    }

    fn delivery_order(customer_id: Uuid) -> Order {
        Order::create(
            customer_id,
            OrderType::Delivery,
            vec![OrderItem::new(Uuid::new_v4(), "Ramen", dec!(12.50), 1, None).unwrap()],
            Some(DeliveryAddress::new("1 Main St", "Springfield", "12345", None, None).unwrap()),
            Utc::now(),
        )
        .unwrap()
    }

    fn pickup_order(customer_id: Uuid) -> Order {
        Order::create(
            customer_id,
            OrderType::Pickup,
            vec![OrderItem::new(Uuid::new_v4(), "Ramen", dec!(12.50), 1, None).unwrap()],
            None,
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn test_only_customers_place_orders() {
        let customer = actor(Role::Customer);
        assert_eq!(
            ensure_customer_places_order(&customer).unwrap(),
            customer.user_id.unwrap()
        );
        for role in [Role::Kitchen, Role::Courier, Role::Admin] {
            assert!(ensure_customer_places_order(&actor(role)).is_err());
        }
        assert!(ensure_customer_places_order(&CurrentActor::anonymous()).is_err());
    }

    #[test]
    fn test_customer_views_only_own_orders() {
        let customer = actor(Role::Customer);
        let own = delivery_order(customer.user_id.unwrap());
        let other = delivery_order(Uuid::new_v4());

        assert!(ensure_can_view_order(&customer, &own).is_ok());
        assert!(ensure_can_view_order(&customer, &other).is_err());
        assert!(ensure_can_view_order(&actor(Role::Kitchen), &other).is_ok());
        assert!(ensure_can_view_order(&actor(Role::Admin), &other).is_ok());
    }

    #[test]
    fn test_courier_views_only_assigned_orders() {
        let courier = actor(Role::Courier);
        let mut assigned = delivery_order(Uuid::new_v4());
        assigned
            .assign_courier(courier.user_id.unwrap(), Utc::now())
            .unwrap();
        let unassigned = delivery_order(Uuid::new_v4());

        assert!(ensure_can_view_order(&courier, &assigned).is_ok());
        assert!(ensure_can_view_order(&courier, &unassigned).is_err());
    }

    #[test]
    fn test_list_filter_is_scoped_by_role() {
        let requested = OrderFilter {
            status: Some(OrderStatus::Pending),
            customer_id: Some(Uuid::new_v4()),
            assigned_courier_id: Some(Uuid::new_v4()),
            ..OrderFilter::default()
        };

        // Customer: own id forced, requested courier id dropped
        let customer = actor(Role::Customer);
        let scoped = scoped_list_filter(&customer, requested).unwrap();
        assert_eq!(scoped.customer_id, customer.user_id);
        assert_eq!(scoped.assigned_courier_id, None);
        assert_eq!(scoped.status, Some(OrderStatus::Pending));

        // Courier: own id forced, requested customer id dropped
        let courier = actor(Role::Courier);
        let scoped = scoped_list_filter(&courier, requested).unwrap();
        assert_eq!(scoped.assigned_courier_id, courier.user_id);
        assert_eq!(scoped.customer_id, None);

        let admin = actor(Role::Admin);
        assert_eq!(scoped_list_filter(&admin, requested).unwrap(), requested);
    }

    #[test]
    fn test_kitchen_cannot_set_delivery_statuses() {
        let kitchen = actor(Role::Kitchen);
        let order = delivery_order(Uuid::new_v4());
        for target in [
            OrderStatus::OutForDelivery,
            OrderStatus::Delivered,
            OrderStatus::UnableToDeliver,
        ] {
            let err = ensure_can_update_status(&kitchen, &order, target).unwrap_err();
            assert!(matches!(err, AppError::Forbidden(_)));
        }
        assert!(ensure_can_update_status(&kitchen, &order, OrderStatus::Preparing).is_ok());
    }

    #[test]
    fn test_kitchen_cancels_only_pending_orders() {
        let kitchen = actor(Role::Kitchen);
        let mut order = pickup_order(Uuid::new_v4());
        assert!(ensure_can_update_status(&kitchen, &order, OrderStatus::Cancelled).is_ok());

        order.change_status(OrderStatus::Preparing, Utc::now()).unwrap();
        let err =
            ensure_can_update_status(&kitchen, &order, OrderStatus::Cancelled).unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(_)));
    }

    #[test]
    fn test_courier_updates_only_own_delivery_outcomes() {
        let courier = actor(Role::Courier);
        let mut order = delivery_order(Uuid::new_v4());

        // Not assigned yet
        assert!(ensure_can_update_status(&courier, &order, OrderStatus::Delivered).is_err());

        order
            .assign_courier(courier.user_id.unwrap(), Utc::now())
            .unwrap();
        assert!(ensure_can_update_status(&courier, &order, OrderStatus::Delivered).is_ok());
        assert!(
            ensure_can_update_status(&courier, &order, OrderStatus::UnableToDeliver).is_ok()
        );
        assert!(ensure_can_update_status(&courier, &order, OrderStatus::Preparing).is_err());

        let pickup = pickup_order(Uuid::new_v4());
        assert!(ensure_can_update_status(&courier, &pickup, OrderStatus::Delivered).is_err());
    }

    #[test]
    fn test_customer_never_updates_status() {
        let customer = actor(Role::Customer);
        let order = delivery_order(customer.user_id.unwrap());
        assert!(ensure_can_update_status(&customer, &order, OrderStatus::Cancelled).is_err());
    }

    #[test]
    fn test_assign_courier_requires_kitchen_or_admin() {
        assert!(ensure_can_assign_courier(&actor(Role::Kitchen)).is_ok());
        assert!(ensure_can_assign_courier(&actor(Role::Admin)).is_ok());
        assert!(ensure_can_assign_courier(&actor(Role::Courier)).is_err());
        assert!(ensure_can_assign_courier(&actor(Role::Customer)).is_err());
    }

    #[test]
    fn test_delivery_assignments_filter_is_forced() {
        let courier = actor(Role::Courier);
        let filter = delivery_assignments_filter(&courier).unwrap();
        assert_eq!(filter.assigned_courier_id, courier.user_id);
        assert_eq!(filter.status, Some(OrderStatus::OutForDelivery));
        assert_eq!(filter.order_type, Some(OrderType::Delivery));

        assert!(delivery_assignments_filter(&actor(Role::Kitchen)).is_err());
    }

    #[test]
    fn test_admin_only_gates() {
        assert!(ensure_admin(&actor(Role::Admin), "view statistics").is_ok());
        assert!(ensure_admin(&actor(Role::Kitchen), "view statistics").is_err());
        assert!(ensure_admin(&CurrentActor::anonymous(), "view statistics").is_err());
    }
}
