//! Order aggregate
//!
//! The central entity of the system. An order is created through
//! [`Order::create`], which validates every invariant atomically, and mutated
//! only through command methods that re-validate on each call. Orders are
//! never deleted; they end in a terminal status (Delivered, UnableToDeliver,
//! Cancelled).

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::assignment::AssignmentInfo;
use super::error::{DomainError, DomainResult};
use super::status::{self, OrderStatus, OrderType};

/// Line item, frozen at order-placement time.
///
/// Name and price are copied from the menu item for historical accuracy:
/// later menu edits must not change what the customer was charged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    menu_item_id: Uuid,
    name: String,
    unit_price: Decimal,
    quantity: u32,
    notes: Option<String>,
}

impl OrderItem {
    pub fn new(
        menu_item_id: Uuid,
        name: impl Into<String>,
        unit_price: Decimal,
        quantity: u32,
        notes: Option<String>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if menu_item_id.is_nil() {
            return Err(DomainError::validation(
                "OrderItem.MenuItemIdRequired",
                "MenuItemId is required.",
            ));
        }
        if name.trim().is_empty() {
            return Err(DomainError::validation(
                "OrderItem.NameRequired",
                "Item name is required.",
            ));
        }
        if unit_price < Decimal::ZERO {
            return Err(DomainError::validation(
                "OrderItem.UnitPriceNegative",
                "Unit price must be non-negative.",
            ));
        }
        if quantity == 0 {
            return Err(DomainError::validation(
                "OrderItem.QuantityNotPositive",
                "Quantity must be greater than zero.",
            ));
        }
        Ok(Self {
            menu_item_id,
            name: name.trim().to_string(),
            unit_price,
            quantity,
            notes: notes
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
        })
    }

    pub fn menu_item_id(&self) -> Uuid {
        self.menu_item_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Address for delivery orders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryAddress {
    street: String,
    city: String,
    zip: String,
    line2: Option<String>,
    country: Option<String>,
}

impl DeliveryAddress {
    pub fn new(
        street: impl Into<String>,
        city: impl Into<String>,
        zip: impl Into<String>,
        line2: Option<String>,
        country: Option<String>,
    ) -> DomainResult<Self> {
        let street = street.into();
        let city = city.into();
        let zip = zip.into();
        if street.trim().is_empty() {
            return Err(DomainError::validation(
                "DeliveryAddress.StreetRequired",
                "Street is required.",
            ));
        }
        if city.trim().is_empty() {
            return Err(DomainError::validation(
                "DeliveryAddress.CityRequired",
                "City is required.",
            ));
        }
        if zip.trim().is_empty() {
            return Err(DomainError::validation(
                "DeliveryAddress.ZipRequired",
                "ZIP/Postal code is required.",
            ));
        }
        Ok(Self {
            street: street.trim().to_string(),
            city: city.trim().to_string(),
            zip: zip.trim().to_string(),
            line2: line2.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()),
            country: country.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()),
        })
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn zip(&self) -> &str {
        &self.zip
    }

    pub fn line2(&self) -> Option<&str> {
        self.line2.as_deref()
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }
}

/// Order aggregate root
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    id: Uuid,
    customer_id: Uuid,
    order_type: OrderType,
    status: OrderStatus,
    created_at: DateTime<Utc>,
    delivery_address: Option<DeliveryAddress>,
    assignment: Option<AssignmentInfo>,
    delivery_time_needed: Option<Duration>,
    items: Vec<OrderItem>,
}

impl Order {
    /// Generic factory for both pickup and delivery orders.
    ///
    /// A delivery order must carry an address; a pickup order must not.
    pub fn create(
        customer_id: Uuid,
        order_type: OrderType,
        items: Vec<OrderItem>,
        delivery_address: Option<DeliveryAddress>,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if customer_id.is_nil() {
            return Err(DomainError::validation(
                "Order.CustomerIdRequired",
                "CustomerId is required.",
            ));
        }
        if items.is_empty() {
            return Err(DomainError::validation(
                "Order.ItemsEmpty",
                "Order must contain at least one item.",
            ));
        }

        let delivery_address = match (order_type, delivery_address) {
            (OrderType::Delivery, Some(address)) => Some(address),
            (OrderType::Delivery, None) => {
                return Err(DomainError::validation(
                    "Order.DeliveryAddressRequired",
                    "Delivery address is required for delivery orders.",
                ));
            }
            (OrderType::Pickup, None) => None,
            (OrderType::Pickup, Some(_)) => {
                return Err(DomainError::validation(
                    "Order.DeliveryAddressNotAllowed",
                    "Pickup orders must not include a delivery address.",
                ));
            }
        };

        Ok(Self {
            id: Uuid::new_v4(),
            customer_id,
            order_type,
            status: OrderStatus::Pending,
            created_at: now,
            delivery_address,
            assignment: None,
            delivery_time_needed: None,
            items,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn customer_id(&self) -> Uuid {
        self.customer_id
    }

    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn delivery_address(&self) -> Option<&DeliveryAddress> {
        self.delivery_address.as_ref()
    }

    pub fn assignment(&self) -> Option<&AssignmentInfo> {
        self.assignment.as_ref()
    }

    pub fn delivery_time_needed(&self) -> Option<Duration> {
        self.delivery_time_needed
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Order total, always recomputed from the items.
    pub fn total(&self) -> Decimal {
        self.items.iter().map(OrderItem::total).sum()
    }

    /// Change the order status if the transition is allowed for the order
    /// type, keeping assignment milestones in sync for delivery orders.
    ///
    /// Progressing to a delivery milestone (OutForDelivery, Delivered,
    /// UnableToDeliver) requires an assigned courier; the guard runs before
    /// any mutation so a failure leaves the order untouched.
    pub fn change_status(&mut self, target: OrderStatus, now: DateTime<Utc>) -> DomainResult<()> {
        if self.status == target {
            return Ok(());
        }

        if !status::can_transition(self.order_type, self.status, target) {
            return Err(DomainError::InvalidTransition {
                order_type: self.order_type,
                from: self.status,
                to: target,
            });
        }

        if matches!(
            target,
            OrderStatus::OutForDelivery | OrderStatus::Delivered | OrderStatus::UnableToDeliver
        ) {
            if self.order_type != OrderType::Delivery {
                return Err(DomainError::validation(
                    "Order.DeliveryStatesOnPickup",
                    "Only delivery orders can progress to delivery states.",
                ));
            }
            if self.assignment.is_none() {
                return Err(DomainError::validation(
                    "Order.MissingAssignment",
                    "Cannot progress to delivery states without an assigned courier.",
                ));
            }
        }

        // Mirror lifecycle timestamps on the assignment for delivery orders
        if self.order_type == OrderType::Delivery
            && let Some(assignment) = &self.assignment
        {
            let updated = match target {
                OrderStatus::OutForDelivery => Some(assignment.mark_out_for_delivery(now)?),
                OrderStatus::Delivered => Some(assignment.mark_delivered(now)?),
                OrderStatus::UnableToDeliver => Some(assignment.mark_unable_to_deliver(now)?),
                _ => None,
            };
            if let Some(updated) = updated {
                self.assignment = Some(updated);
            }
        }

        self.status = target;
        Ok(())
    }

    /// Assign a courier to a delivery order, replacing any prior assignment.
    pub fn assign_courier(&mut self, courier_id: Uuid, now: DateTime<Utc>) -> DomainResult<()> {
        if self.order_type != OrderType::Delivery {
            return Err(DomainError::validation(
                "Order.AssignCourierOnPickup",
                "Cannot assign a courier to a pickup order.",
            ));
        }
        if courier_id.is_nil() {
            return Err(DomainError::validation(
                "Order.CourierIdRequired",
                "CourierId is required.",
            ));
        }
        if !matches!(
            self.status,
            OrderStatus::Pending | OrderStatus::Preparing | OrderStatus::ReadyForDelivery
        ) {
            return Err(DomainError::validation(
                "Order.Status",
                "Order is not in an assignable state.",
            ));
        }

        self.assignment = Some(AssignmentInfo::new(courier_id, now)?);
        Ok(())
    }

    /// Set the estimated travel time for a delivery order.
    pub fn set_delivery_time_needed(&mut self, duration: Duration) -> DomainResult<()> {
        if self.order_type != OrderType::Delivery {
            return Err(DomainError::validation(
                "Order.DeliveryTimeOnPickup",
                "Delivery time is only valid for delivery orders.",
            ));
        }
        if duration <= Duration::zero() {
            return Err(DomainError::validation(
                "Order.DeliveryTimeInvalid",
                "Delivery duration must be positive.",
            ));
        }
        self.delivery_time_needed = Some(duration);
        Ok(())
    }
}
