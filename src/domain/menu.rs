//! Menu item entity
//!
//! Mutations are explicit command methods that validate and return a
//! `DomainResult` rather than fluent setters.

use rust_decimal::Decimal;
use uuid::Uuid;

use super::error::{DomainError, DomainResult};

#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    id: Uuid,
    name: String,
    price: Decimal,
    category: String,
    is_available: bool,
}

impl MenuItem {
    /// Creation allows a zero price (e.g. a free side); updates via
    /// [`MenuItem::reprice`] require a strictly positive price.
    pub fn create(
        name: impl Into<String>,
        price: Decimal,
        category: impl Into<String>,
        is_available: bool,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation(
                "MenuItem.NameRequired",
                "Name is required.",
            ));
        }
        if price < Decimal::ZERO {
            return Err(DomainError::validation(
                "MenuItem.PriceNegative",
                "Price must be non-negative.",
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            price,
            category: category.into().trim().to_string(),
            is_available,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn is_available(&self) -> bool {
        self.is_available
    }

    pub fn rename(&mut self, name: impl Into<String>) -> DomainResult<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation(
                "MenuItem.NameRequired",
                "Menu item name cannot be empty.",
            ));
        }
        self.name = name.trim().to_string();
        Ok(())
    }

    pub fn reprice(&mut self, price: Decimal) -> DomainResult<()> {
        if price <= Decimal::ZERO {
            return Err(DomainError::validation(
                "MenuItem.PriceNotPositive",
                "Menu item price must be greater than zero.",
            ));
        }
        self.price = price;
        Ok(())
    }

    pub fn recategorize(&mut self, category: impl Into<String>) -> DomainResult<()> {
        let category = category.into();
        if category.trim().is_empty() {
            return Err(DomainError::validation(
                "MenuItem.CategoryRequired",
                "Menu item category cannot be empty.",
            ));
        }
        self.category = category.trim().to_string();
        Ok(())
    }

    pub fn set_availability(&mut self, is_available: bool) {
        self.is_available = is_available;
    }
}
