//! Menu use cases
//!
//! Reads are public; mutations are admin-only.

use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::{CurrentActor, policy};
use crate::domain::MenuItem;
use crate::utils::{AppError, AppResult};

use super::AppContext;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMenuItem {
    pub name: String,
    pub price: Decimal,
    pub category: String,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

fn default_available() -> bool {
    true
}

/// All fields optional; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub is_available: Option<bool>,
}

pub async fn list_menu(ctx: &AppContext) -> AppResult<Vec<MenuItem>> {
    Ok(ctx.menu.get_all().await?)
}

pub async fn get_menu_item(ctx: &AppContext, id: Uuid) -> AppResult<MenuItem> {
    ctx.menu
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Menu item {id}")))
}

pub async fn create_menu_item(
    ctx: &AppContext,
    actor: &CurrentActor,
    request: NewMenuItem,
) -> AppResult<MenuItem> {
    policy::ensure_admin(actor, "create menu items")?;

    let item = MenuItem::create(
        request.name,
        request.price,
        request.category,
        request.is_available,
    )?;
    ctx.menu.add(item.clone()).await?;
    ctx.unit_of_work.commit().await?;

    tracing::info!(menu_item_id = %item.id(), name = %item.name(), "menu item created");
    Ok(item)
}

pub async fn update_menu_item(
    ctx: &AppContext,
    actor: &CurrentActor,
    id: Uuid,
    update: MenuItemUpdate,
) -> AppResult<MenuItem> {
    policy::ensure_admin(actor, "update menu items")?;

    let mut item = ctx
        .menu
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Menu item {id}")))?;

    if let Some(name) = update.name {
        item.rename(name)?;
    }
    if let Some(price) = update.price {
        item.reprice(price)?;
    }
    if let Some(category) = update.category {
        item.recategorize(category)?;
    }
    if let Some(is_available) = update.is_available {
        item.set_availability(is_available);
    }

    ctx.menu.update(item.clone()).await?;
    ctx.unit_of_work.commit().await?;
    Ok(item)
}

pub async fn delete_menu_item(ctx: &AppContext, actor: &CurrentActor, id: Uuid) -> AppResult<()> {
    policy::ensure_admin(actor, "delete menu items")?;

    if ctx.menu.get_by_id(id).await?.is_none() {
        return Err(AppError::not_found(format!("Menu item {id}")));
    }
    ctx.menu.delete(id).await?;
    ctx.unit_of_work.commit().await?;

    tracing::info!(menu_item_id = %id, "menu item deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::app::test_context;
    use crate::auth::Role;
    use crate::store::MemoryStore;

    fn admin() -> CurrentActor {
        CurrentActor::authenticated(Uuid::new_v4(), Role::Admin)
    }

    #[tokio::test]
    async fn menu_crud_is_admin_gated() {
        let ctx = test_context(MemoryStore::new());
        let request = NewMenuItem {
            name: "Carbonara".to_string(),
            price: dec!(11.00),
            category: "Pasta".to_string(),
            is_available: true,
        };

        let kitchen = CurrentActor::authenticated(Uuid::new_v4(), Role::Kitchen);
        let err = create_menu_item(&ctx, &kitchen, request.clone())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let item = create_menu_item(&ctx, &admin(), request).await.unwrap();
        assert_eq!(list_menu(&ctx).await.unwrap().len(), 1);

        let updated = update_menu_item(
            &ctx,
            &admin(),
            item.id(),
            MenuItemUpdate {
                price: Some(dec!(12.50)),
                ..MenuItemUpdate::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.price(), dec!(12.50));

        delete_menu_item(&ctx, &admin(), item.id()).await.unwrap();
        assert!(list_menu(&ctx).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_rejects_non_positive_price() {
        let ctx = test_context(MemoryStore::new());
        let item = create_menu_item(
            &ctx,
            &admin(),
            NewMenuItem {
                name: "Tiramisu".to_string(),
                price: dec!(6.00),
                category: "Dessert".to_string(),
                is_available: true,
            },
        )
        .await
        .unwrap();

        let err = update_menu_item(
            &ctx,
            &admin(),
            item.id(),
            MenuItemUpdate {
                price: Some(dec!(0)),
                ..MenuItemUpdate::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn missing_menu_item_is_not_found() {
        let ctx = test_context(MemoryStore::new());
        let err = delete_menu_item(&ctx, &admin(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
