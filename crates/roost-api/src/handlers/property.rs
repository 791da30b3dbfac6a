//! Property listing handlers
//!
//! Listing and detail endpoints are public; when a bearer token is
//! present the response additionally carries the requesting user's
//! relation flags. Mutations require a seller or admin role.

use axum::extract::{Path, Query, State};
use axum::Json;
use std::sync::Arc;
use uuid::Uuid;

use roost_db::{NewProperty, PropertyUpdate};
use roost_types::{PropertyAction, UserRole};

use crate::dto::{
    CreatePropertyRequest, MessageResponse, PropertyQuery, PropertyView, ToggleRequest,
    ToggleResponse, UpdatePropertyRequest, UserStatusView,
};
use crate::error::{ApiError, ApiResult};
use crate::extractors::{AuthUser, AuthenticatedUser, OptionalUser, ValidatedJson};
use crate::state::AppState;

/// List properties, optionally filtered by free-text search
#[utoipa::path(
    get,
    path = "/api/v1/properties",
    tag = "Properties",
    params(("q" = Option<String>, Query, description = "Match on title, location or bedrooms")),
    responses(
        (status = 200, description = "Listings", body = [PropertyView])
    )
)]
pub async fn list_properties(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PropertyQuery>,
) -> ApiResult<Json<Vec<PropertyView>>> {
    let properties = state.db.property_repo().list(query.q.as_deref()).await?;

    Ok(Json(properties.into_iter().map(PropertyView::from).collect()))
}

/// A single listing, with relation flags when authenticated
#[utoipa::path(
    get,
    path = "/api/v1/properties/{id}",
    tag = "Properties",
    params(("id" = Uuid, Path, description = "Property id")),
    responses(
        (status = 200, description = "Listing", body = PropertyView),
        (status = 404, description = "Property not found")
    )
)]
pub async fn get_property(
    State(state): State<Arc<AppState>>,
    OptionalUser(user): OptionalUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<PropertyView>> {
    let property = state
        .db
        .property_repo()
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound("Property"))?;

    let user_status = match user {
        Some(auth) => Some(state.db.property_repo().user_status(auth.user_id, id).await?),
        None => None,
    };

    Ok(Json(PropertyView::new(property, user_status)))
}

/// Create a listing; seller and admin roles only
#[utoipa::path(
    post,
    path = "/api/v1/properties",
    tag = "Properties",
    request_body = CreatePropertyRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Listing created", body = PropertyView),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role cannot list properties")
    )
)]
pub async fn create_property(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(auth): AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<CreatePropertyRequest>,
) -> ApiResult<Json<PropertyView>> {
    if auth.role != UserRole::Seller && !auth.is_admin() {
        return Err(ApiError::Forbidden);
    }

    let new = NewProperty {
        seller_id: auth.user_id,
        title: request.title,
        image_src: request.image_src,
        views: request.views,
        bedrooms: request.bedrooms,
        rating: request.rating,
        sf: request.sf,
        reviews: request.reviews,
        price: request.price,
        location: request.location,
        overview: request.overview,
        about: request.about,
    };

    let property = state.db.property_repo().create(&new).await?;

    tracing::info!(property_id = %property.id, seller_id = %auth.user_id, "Listing created");

    Ok(Json(property.into()))
}

/// Update a listing; owner or admin only
#[utoipa::path(
    put,
    path = "/api/v1/properties/{id}",
    tag = "Properties",
    params(("id" = Uuid, Path, description = "Property id")),
    request_body = UpdatePropertyRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Listing updated", body = PropertyView),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Property not found")
    )
)]
pub async fn update_property(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(auth): AuthenticatedUser,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdatePropertyRequest>,
) -> ApiResult<Json<PropertyView>> {
    ensure_owner_or_admin(&state, &auth, id).await?;

    let update = PropertyUpdate {
        title: request.title,
        image_src: request.image_src,
        views: request.views,
        bedrooms: request.bedrooms,
        rating: request.rating,
        sf: request.sf,
        reviews: request.reviews,
        price: request.price,
        location: request.location,
        overview: request.overview,
        about: request.about,
    };

    let property = state.db.property_repo().update(id, &update).await?;

    Ok(Json(property.into()))
}

/// Delete a listing; owner or admin only
#[utoipa::path(
    delete,
    path = "/api/v1/properties/{id}",
    tag = "Properties",
    params(("id" = Uuid, Path, description = "Property id")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Listing deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Property not found")
    )
)]
pub async fn delete_property(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(auth): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    ensure_owner_or_admin(&state, &auth, id).await?;

    state.db.property_repo().delete(id).await?;

    tracing::info!(property_id = %id, user_id = %auth.user_id, "Listing deleted");

    Ok(Json(MessageResponse::new("property deleted")))
}

/// Toggle a bought/wishlist/invested/rented relation on a listing
#[utoipa::path(
    post,
    path = "/api/v1/properties/{id}/toggle",
    tag = "Properties",
    params(("id" = Uuid, Path, description = "Property id")),
    request_body = ToggleRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Relation toggled", body = ToggleResponse),
        (status = 400, description = "Unknown action"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Property not found")
    )
)]
pub async fn toggle_property(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(auth): AuthenticatedUser,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<ToggleRequest>,
) -> ApiResult<Json<ToggleResponse>> {
    let action: PropertyAction = request
        .action
        .parse()
        .map_err(|_| ApiError::Validation(format!("unknown action {}", request.action)))?;

    state
        .db
        .property_repo()
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound("Property"))?;

    let active = state.db.property_repo().toggle(auth.user_id, id, action).await?;

    tracing::info!(property_id = %id, user_id = %auth.user_id, %action, active, "Relation toggled");

    Ok(Json(ToggleResponse {
        action: action.to_string(),
        active,
    }))
}

/// The requesting user's relation flags for one listing
#[utoipa::path(
    get,
    path = "/api/v1/properties/{id}/status",
    tag = "Properties",
    params(("id" = Uuid, Path, description = "Property id")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Relation flags", body = UserStatusView),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Property not found")
    )
)]
pub async fn property_status(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(auth): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<UserStatusView>> {
    state
        .db
        .property_repo()
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound("Property"))?;

    let status = state.db.property_repo().user_status(auth.user_id, id).await?;

    Ok(Json(status.into()))
}

/// Listings related to the requesting user through one relation
#[utoipa::path(
    get,
    path = "/api/v1/properties/related/{action}",
    tag = "Properties",
    params(("action" = String, Path, description = "bought, wishlist, invested or rented")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Related listings", body = [PropertyView]),
        (status = 400, description = "Unknown action"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn related_properties(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(auth): AuthenticatedUser,
    Path(action): Path<String>,
) -> ApiResult<Json<Vec<PropertyView>>> {
    let action: PropertyAction = action
        .parse()
        .map_err(|_| ApiError::Validation(format!("unknown action {}", action)))?;

    let related = state
        .db
        .property_repo()
        .list_related(auth.user_id, action)
        .await?;

    Ok(Json(
        related
            .into_iter()
            .map(|(property, _link)| property.into())
            .collect(),
    ))
}

async fn ensure_owner_or_admin(state: &AppState, auth: &AuthUser, id: Uuid) -> ApiResult<()> {
    let property = state
        .db
        .property_repo()
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound("Property"))?;

    if property.seller_id != auth.user_id && !auth.is_admin() {
        return Err(ApiError::Forbidden);
    }

    Ok(())
}
