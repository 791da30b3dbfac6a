//! Property repository
//!
//! Listings plus the four per-user relation tables (bought, wishlist,
//! invested, rented). Table names cannot be bound as SQL parameters, so the
//! relation queries are selected by a match over [`PropertyAction`].

use sqlx::PgPool;
use uuid::Uuid;

use roost_types::{PropertyAction, SaleStatus};

use crate::{DbError, DbResult, DbProperty, DbPropertyLink, PropertyUserStatus};

/// Fields accepted when creating a listing
#[derive(Debug, Clone)]
pub struct NewProperty {
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
}

/// Optional fields for a partial update
#[derive(Debug, Clone, Default)]
pub struct PropertyUpdate {
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

pub struct PropertyRepo {
    pool: PgPool,
}

impl PropertyRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: &NewProperty) -> DbResult<DbProperty> {
        let property = sqlx::query_as::<_, DbProperty>(
            r#"
            INSERT INTO properties
                (seller_id, title, image_src, views, bedrooms, rating, sf, reviews,
                 price, location, overview, about)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(new.seller_id)
        .bind(&new.title)
        .bind(&new.image_src)
        .bind(&new.views)
        .bind(&new.bedrooms)
        .bind(new.rating)
        .bind(&new.sf)
        .bind(new.reviews)
        .bind(&new.price)
        .bind(&new.location)
        .bind(&new.overview)
        .bind(&new.about)
        .fetch_one(&self.pool)
        .await?;

        Ok(property)
    }

    pub async fn update(&self, id: Uuid, update: &PropertyUpdate) -> DbResult<DbProperty> {
        let property = sqlx::query_as::<_, DbProperty>(
            r#"
            UPDATE properties
            SET title     = COALESCE($2, title),
                image_src = COALESCE($3, image_src),
                views     = COALESCE($4, views),
                bedrooms  = COALESCE($5, bedrooms),
                rating    = COALESCE($6, rating),
                sf        = COALESCE($7, sf),
                reviews   = COALESCE($8, reviews),
                price     = COALESCE($9, price),
                location  = COALESCE($10, location),
                overview  = COALESCE($11, overview),
                about     = COALESCE($12, about),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&update.title)
        .bind(&update.image_src)
        .bind(&update.views)
        .bind(&update.bedrooms)
        .bind(update.rating)
        .bind(&update.sf)
        .bind(update.reviews)
        .bind(&update.price)
        .bind(&update.location)
        .bind(&update.overview)
        .bind(&update.about)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound("Property not found".to_string()))?;

        Ok(property)
    }

    pub async fn delete(&self, id: Uuid) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM properties WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound("Property not found".to_string()));
        }

        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> DbResult<Option<DbProperty>> {
        let property = sqlx::query_as::<_, DbProperty>("SELECT * FROM properties WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(property)
    }

    /// List all properties, optionally filtered by a case-insensitive match
    /// on title, location or bedrooms.
    pub async fn list(&self, query: Option<&str>) -> DbResult<Vec<DbProperty>> {
        let properties = if let Some(q) = query {
            let pattern = format!("%{}%", q);
            sqlx::query_as::<_, DbProperty>(
                r#"
                SELECT * FROM properties
                WHERE title ILIKE $1 OR location ILIKE $1 OR bedrooms ILIKE $1
                ORDER BY created_at DESC
                "#,
            )
            .bind(pattern)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, DbProperty>(
                "SELECT * FROM properties ORDER BY created_at DESC",
            )
            .fetch_all(&self.pool)
            .await?
        };

        Ok(properties)
    }

    /// Toggle a user/property relation and return whether it is now active.
    ///
    /// Toggling `Bought` also flips the listing's sale status: active bought
    /// relation means SOLD, removing it makes the listing AVAILABLE again.
    pub async fn toggle(
        &self,
        user_id: Uuid,
        property_id: Uuid,
        action: PropertyAction,
    ) -> DbResult<bool> {
        let mut db_tx = self.pool.begin().await?;

        let delete_sql = match action {
            PropertyAction::Bought => {
                "DELETE FROM bought_properties WHERE user_id = $1 AND property_id = $2"
            }
            PropertyAction::Wishlist => {
                "DELETE FROM wishlist_properties WHERE user_id = $1 AND property_id = $2"
            }
            PropertyAction::Invested => {
                "DELETE FROM invested_properties WHERE user_id = $1 AND property_id = $2"
            }
            PropertyAction::Rented => {
                "DELETE FROM rented_properties WHERE user_id = $1 AND property_id = $2"
            }
        };

        let removed = sqlx::query(delete_sql)
            .bind(user_id)
            .bind(property_id)
            .execute(&mut *db_tx)
            .await?
            .rows_affected()
            > 0;

        let active = if removed {
            false
        } else {
            let insert_sql = match action {
                PropertyAction::Bought => {
                    "INSERT INTO bought_properties (user_id, property_id) VALUES ($1, $2)"
                }
                PropertyAction::Wishlist => {
                    "INSERT INTO wishlist_properties (user_id, property_id) VALUES ($1, $2)"
                }
                PropertyAction::Invested => {
                    "INSERT INTO invested_properties (user_id, property_id) VALUES ($1, $2)"
                }
                PropertyAction::Rented => {
                    "INSERT INTO rented_properties (user_id, property_id) VALUES ($1, $2)"
                }
            };

            sqlx::query(insert_sql)
                .bind(user_id)
                .bind(property_id)
                .execute(&mut *db_tx)
                .await?;
            true
        };

        if action == PropertyAction::Bought {
            let status = if active { SaleStatus::Sold } else { SaleStatus::Available };
            sqlx::query("UPDATE properties SET sale_status = $2, updated_at = NOW() WHERE id = $1")
                .bind(property_id)
                .bind(status.as_str())
                .execute(&mut *db_tx)
                .await?;
        }

        db_tx.commit().await?;

        Ok(active)
    }

    /// Per-user relation flags for one listing
    pub async fn user_status(
        &self,
        user_id: Uuid,
        property_id: Uuid,
    ) -> DbResult<PropertyUserStatus> {
        let (is_bought, is_wishlisted, is_invested, is_rented): (bool, bool, bool, bool) =
            sqlx::query_as(
                r#"
                SELECT
                    EXISTS(SELECT 1 FROM bought_properties   WHERE user_id = $1 AND property_id = $2),
                    EXISTS(SELECT 1 FROM wishlist_properties WHERE user_id = $1 AND property_id = $2),
                    EXISTS(SELECT 1 FROM invested_properties WHERE user_id = $1 AND property_id = $2),
                    EXISTS(SELECT 1 FROM rented_properties   WHERE user_id = $1 AND property_id = $2)
                "#,
            )
            .bind(user_id)
            .bind(property_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(PropertyUserStatus {
            is_bought,
            is_wishlisted,
            is_invested,
            is_rented,
        })
    }

    /// Listings related to a user through one relation, most recent first
    pub async fn list_related(
        &self,
        user_id: Uuid,
        action: PropertyAction,
    ) -> DbResult<Vec<(DbProperty, DbPropertyLink)>> {
        let sql = match action {
            PropertyAction::Bought => RELATED_BOUGHT_SQL,
            PropertyAction::Wishlist => RELATED_WISHLIST_SQL,
            PropertyAction::Invested => RELATED_INVESTED_SQL,
            PropertyAction::Rented => RELATED_RENTED_SQL,
        };

        let rows: Vec<RelatedRow> = sqlx::query_as(sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(RelatedRow::split).collect())
    }
}

const RELATED_BOUGHT_SQL: &str = r#"
    SELECT p.*, l.user_id AS link_user_id, l.created_at AS link_created_at
    FROM bought_properties l JOIN properties p ON p.id = l.property_id
    WHERE l.user_id = $1 ORDER BY l.created_at DESC
"#;
const RELATED_WISHLIST_SQL: &str = r#"
    SELECT p.*, l.user_id AS link_user_id, l.created_at AS link_created_at
    FROM wishlist_properties l JOIN properties p ON p.id = l.property_id
    WHERE l.user_id = $1 ORDER BY l.created_at DESC
"#;
const RELATED_INVESTED_SQL: &str = r#"
    SELECT p.*, l.user_id AS link_user_id, l.created_at AS link_created_at
    FROM invested_properties l JOIN properties p ON p.id = l.property_id
    WHERE l.user_id = $1 ORDER BY l.created_at DESC
"#;
const RELATED_RENTED_SQL: &str = r#"
    SELECT p.*, l.user_id AS link_user_id, l.created_at AS link_created_at
    FROM rented_properties l JOIN properties p ON p.id = l.property_id
    WHERE l.user_id = $1 ORDER BY l.created_at DESC
"#;

#[derive(sqlx::FromRow)]
struct RelatedRow {
    #[sqlx(flatten)]
    property: DbProperty,
    link_user_id: Uuid,
    link_created_at: chrono::DateTime<chrono::Utc>,
}

impl RelatedRow {
    fn split(self) -> (DbProperty, DbPropertyLink) {
        let link = DbPropertyLink {
            user_id: self.link_user_id,
            property_id: self.property.id,
            created_at: self.link_created_at,
        };
        (self.property, link)
    }
}
