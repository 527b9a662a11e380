//! In-memory store
//!
//! Lock-based maps with an explicit staging buffer: `add`/`update`/`delete`
//! record pending writes, `commit` applies them in order and returns the
//! affected-row count. Reads only ever see committed data, which mirrors how
//! a change-tracking persistence layer behaves before `SaveChanges`.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use uuid::Uuid;

use crate::domain::{Customer, MenuItem, Order, OrderFilter, OrderStatus, OrderType, Staff};

use super::{
    CustomerStore, MenuItemStore, OrderStore, StaffStore, StoreError, StoreResult, UnitOfWork,
};

#[derive(Debug, Default)]
struct Tables {
    orders: HashMap<Uuid, Order>,
    menu_items: HashMap<Uuid, MenuItem>,
    staff: HashMap<Uuid, Staff>,
    customers: HashMap<Uuid, Customer>,
}

#[derive(Debug)]
enum StagedWrite {
    AddOrder(Order),
    UpdateOrder(Order),
    AddMenuItem(MenuItem),
    UpdateMenuItem(MenuItem),
    DeleteMenuItem(Uuid),
}

#[derive(Debug, Default)]
struct Inner {
    tables: RwLock<Tables>,
    staged: Mutex<Vec<StagedWrite>>,
}

/// Shared in-memory store; cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Seeding (bypasses staging; startup and tests) ───────────────

    pub fn seed_staff(&self, staff: Staff) {
        self.inner.tables.write().staff.insert(staff.id(), staff);
    }

    pub fn seed_customer(&self, customer: Customer) {
        self.inner
            .tables
            .write()
            .customers
            .insert(customer.id, customer);
    }

    pub fn seed_menu_item(&self, item: MenuItem) {
        self.inner.tables.write().menu_items.insert(item.id(), item);
    }

    pub fn staff_count(&self) -> usize {
        self.inner.tables.read().staff.len()
    }

    /// Number of writes staged but not yet committed.
    pub fn staged_count(&self) -> usize {
        self.inner.staged.lock().len()
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<Order>> {
        Ok(self.inner.tables.read().orders.get(&id).cloned())
    }

    async fn get_by_filter(
        &self,
        filter: &OrderFilter,
        max_results: Option<usize>,
    ) -> StoreResult<Vec<Order>> {
        let tables = self.inner.tables.read();
        let mut orders: Vec<Order> = tables
            .orders
            .values()
            .filter(|o| filter.matches(o))
            .cloned()
            .collect();
        orders.sort_by_key(Order::created_at);
        if let Some(max) = max_results {
            orders.truncate(max);
        }
        Ok(orders)
    }

    async fn pending_assignment(&self, max: usize) -> StoreResult<Vec<Order>> {
        let tables = self.inner.tables.read();
        let mut orders: Vec<Order> = tables
            .orders
            .values()
            .filter(|o| {
                o.order_type() == OrderType::Delivery
                    && o.assignment().is_none()
                    && matches!(
                        o.status(),
                        OrderStatus::Pending | OrderStatus::ReadyForDelivery
                    )
            })
            .cloned()
            .collect();
        orders.sort_by_key(Order::created_at);
        orders.truncate(max);
        Ok(orders)
    }

    async fn add(&self, order: Order) -> StoreResult<()> {
        if self.inner.tables.read().orders.contains_key(&order.id()) {
            return Err(StoreError::Duplicate(format!("Order {}", order.id())));
        }
        self.inner.staged.lock().push(StagedWrite::AddOrder(order));
        Ok(())
    }

    async fn update(&self, order: Order) -> StoreResult<()> {
        self.inner
            .staged
            .lock()
            .push(StagedWrite::UpdateOrder(order));
        Ok(())
    }
}

#[async_trait]
impl MenuItemStore for MemoryStore {
    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<MenuItem>> {
        Ok(self.inner.tables.read().menu_items.get(&id).cloned())
    }

    async fn get_all(&self) -> StoreResult<Vec<MenuItem>> {
        let tables = self.inner.tables.read();
        let mut items: Vec<MenuItem> = tables.menu_items.values().cloned().collect();
        items.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(items)
    }

    async fn add(&self, item: MenuItem) -> StoreResult<()> {
        if self.inner.tables.read().menu_items.contains_key(&item.id()) {
            return Err(StoreError::Duplicate(format!("Menu item {}", item.id())));
        }
        self.inner
            .staged
            .lock()
            .push(StagedWrite::AddMenuItem(item));
        Ok(())
    }

    async fn update(&self, item: MenuItem) -> StoreResult<()> {
        self.inner
            .staged
            .lock()
            .push(StagedWrite::UpdateMenuItem(item));
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        self.inner
            .staged
            .lock()
            .push(StagedWrite::DeleteMenuItem(id));
        Ok(())
    }
}

#[async_trait]
impl StaffStore for MemoryStore {
    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<Staff>> {
        Ok(self.inner.tables.read().staff.get(&id).cloned())
    }

    async fn get_available_couriers(&self) -> StoreResult<Vec<Staff>> {
        let tables = self.inner.tables.read();
        let mut couriers: Vec<Staff> = tables
            .staff
            .values()
            .filter(|s| s.is_available_courier())
            .cloned()
            .collect();
        couriers.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(couriers)
    }
}

#[async_trait]
impl CustomerStore for MemoryStore {
    async fn exists(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.inner.tables.read().customers.contains_key(&id))
    }
}

#[async_trait]
impl UnitOfWork for MemoryStore {
    async fn commit(&self) -> StoreResult<usize> {
        let staged: Vec<StagedWrite> = self.inner.staged.lock().drain(..).collect();
        let mut tables = self.inner.tables.write();
        let affected = staged.len();

        for write in staged {
            match write {
                StagedWrite::AddOrder(order) | StagedWrite::UpdateOrder(order) => {
                    tables.orders.insert(order.id(), order);
                }
                StagedWrite::AddMenuItem(item) | StagedWrite::UpdateMenuItem(item) => {
                    tables.menu_items.insert(item.id(), item);
                }
                StagedWrite::DeleteMenuItem(id) => {
                    tables.menu_items.remove(&id);
                }
            }
        }

        Ok(affected)
    }
}
