//! Menu API handlers

use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::app::menu::{self, MenuItemUpdate, NewMenuItem};
use crate::auth::CurrentActor;
use crate::core::ServerState;
use crate::domain::MenuItem;
use crate::utils::AppResult;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemResponse {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub category: String,
    pub is_available: bool,
}

impl From<&MenuItem> for MenuItemResponse {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id(),
            name: item.name().to_string(),
            price: item.price(),
            category: item.category().to_string(),
            is_available: item.is_available(),
        }
    }
}

/// GET /api/menu - the full menu
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuItemResponse>>> {
    let items = menu::list_menu(&state.ctx).await?;
    Ok(Json(items.iter().map(MenuItemResponse::from).collect()))
}

/// GET /api/menu/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MenuItemResponse>> {
    let item = menu::get_menu_item(&state.ctx, id).await?;
    Ok(Json(MenuItemResponse::from(&item)))
}

/// POST /api/menu - create a menu item (admin)
pub async fn create(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Json(payload): Json<NewMenuItem>,
) -> AppResult<Json<MenuItemResponse>> {
    let item = menu::create_menu_item(&state.ctx, &actor, payload).await?;
    Ok(Json(MenuItemResponse::from(&item)))
}

/// PUT /api/menu/:id - update a menu item (admin)
pub async fn update(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Path(id): Path<Uuid>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItemResponse>> {
    let item = menu::update_menu_item(&state.ctx, &actor, id, payload).await?;
    Ok(Json(MenuItemResponse::from(&item)))
}

/// DELETE /api/menu/:id - delete a menu item (admin)
pub async fn delete(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    menu::delete_menu_item(&state.ctx, &actor, id).await?;
    Ok(Json(serde_json::json!({ "deleted": id })))
}
