//! Property listing DTOs

use chrono::{DateTime, Utc};
use roost_db::{DbProperty, PropertyUserStatus};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreatePropertyRequest {
    #[validate(length(min = 2, max = 200, message = "must be 2-200 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub image_src: String,
    #[serde(default)]
    pub views: Vec<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub bedrooms: String,
    #[serde(default)]
    pub rating: f64,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub sf: String,
    #[serde(default)]
    pub reviews: i32,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub price: String,
    #[validate(length(min = 2, max = 200, message = "must be 2-200 characters"))]
    pub location: String,
    #[serde(default = "default_overview")]
    pub overview: serde_json::Value,
    #[serde(default)]
    pub about: Vec<String>,
}

fn default_overview() -> serde_json::Value {
    serde_json::json!({})
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdatePropertyRequest {
    pub title: Option<String>,
    pub image_src: Option<String>,
    pub views: Option<Vec<String>>,
    pub bedrooms: Option<String>,
    pub rating: Option<f64>,
    pub sf: Option<String>,
    pub reviews: Option<i32>,
    pub price: Option<String>,
    pub location: Option<String>,
    pub overview: Option<serde_json::Value>,
    pub about: Option<Vec<String>>,
}

/// Free-text search over title, location and bedrooms
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PropertyQuery {
    pub q: Option<String>,
}

/// Toggle one relation (bought, wishlist, invested, rented)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ToggleRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub action: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ToggleResponse {
    pub action: String,
    /// Whether the relation is active after the toggle
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PropertyView {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub title: String,
    pub image_src: String,
    pub views: Vec<String>,
    pub bedrooms: String,
    pub rating: f64,
    pub sf: String,
    pub reviews: i32,
    pub price: String,
    pub location: String,
    pub overview: serde_json::Value,
    pub about: Vec<String>,
    pub sale_status: String,
    pub created_at: DateTime<Utc>,
    /// Relation flags for the requesting user, absent on public requests
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_status: Option<UserStatusView>,
}

impl PropertyView {
    pub fn new(property: DbProperty, user_status: Option<PropertyUserStatus>) -> Self {
        Self {
            id: property.id,
            seller_id: property.seller_id,
            title: property.title,
            image_src: property.image_src,
            views: property.views,
            bedrooms: property.bedrooms,
            rating: property.rating,
            sf: property.sf,
            reviews: property.reviews,
            price: property.price,
            location: property.location,
            overview: property.overview,
            about: property.about,
            sale_status: property.sale_status,
            created_at: property.created_at,
            user_status: user_status.map(UserStatusView::from),
        }
    }
}

impl From<DbProperty> for PropertyView {
    fn from(property: DbProperty) -> Self {
        Self::new(property, None)
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserStatusView {
    pub is_bought: bool,
    pub is_wishlisted: bool,
    pub is_invested: bool,
    pub is_rented: bool,
}

impl From<PropertyUserStatus> for UserStatusView {
    fn from(status: PropertyUserStatus) -> Self {
        Self {
            is_bought: status.is_bought,
            is_wishlisted: status.is_wishlisted,
            is_invested: status.is_invested,
            is_rented: status.is_rented,
        }
    }
}
