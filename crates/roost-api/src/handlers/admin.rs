//! Admin handlers
//!
//! All endpoints here sit behind the [`RequireAdmin`] extractor. Role
//! promotion to superadmin is itself restricted to superadmins.

use axum::extract::{Path, State};
use axum::Json;
use std::sync::Arc;
use uuid::Uuid;

use roost_types::{KycStatus, UserRole};

use crate::dto::{MessageResponse, UpdateKycRequest, UpdateRoleRequest, UserProfile};
use crate::error::{ApiError, ApiResult};
use crate::extractors::{RequireAdmin, ValidatedJson};
use crate::state::AppState;

/// List all registered users
#[utoipa::path(
    get,
    path = "/api/v1/admin/users",
    tag = "Admin",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All users", body = [UserProfile]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    RequireAdmin(_admin): RequireAdmin,
) -> ApiResult<Json<Vec<UserProfile>>> {
    let users = state.db.user_repo().list_all().await?;

    Ok(Json(users.into_iter().map(UserProfile::from).collect()))
}

/// Change a user's role
#[utoipa::path(
    put,
    path = "/api/v1/admin/users/{id}/role",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UpdateRoleRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Role updated", body = UserProfile),
        (status = 400, description = "Unknown role"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user_role(
    State(state): State<Arc<AppState>>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateRoleRequest>,
) -> ApiResult<Json<UserProfile>> {
    let role: UserRole = request
        .role
        .parse()
        .map_err(|_| ApiError::Validation(format!("unknown role {}", request.role)))?;

    // Only a superadmin may mint another superadmin
    if role == UserRole::Superadmin && admin.role != UserRole::Superadmin {
        return Err(ApiError::Forbidden);
    }

    let user = state.db.user_repo().update_role(id, role).await?;

    tracing::info!(user_id = %id, role = %role, admin_id = %admin.user_id, "Role updated");

    Ok(Json(user.into()))
}

/// Set a user's KYC status after review
#[utoipa::path(
    put,
    path = "/api/v1/admin/users/{id}/kyc",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UpdateKycRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "KYC status updated", body = UserProfile),
        (status = 400, description = "Unknown status"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user_kyc(
    State(state): State<Arc<AppState>>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateKycRequest>,
) -> ApiResult<Json<UserProfile>> {
    let status: KycStatus = request
        .status
        .parse()
        .map_err(|_| ApiError::Validation(format!("unknown status {}", request.status)))?;

    let user = state.db.user_repo().update_kyc_status(id, status).await?;

    tracing::info!(user_id = %id, status = %status, admin_id = %admin.user_id, "KYC status updated");

    Ok(Json(user.into()))
}

/// Delete a user account
#[utoipa::path(
    delete,
    path = "/api/v1/admin/users/{id}",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "User id")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    state.db.user_repo().delete(id).await?;

    tracing::info!(user_id = %id, admin_id = %admin.user_id, "User deleted");

    Ok(Json(MessageResponse::new("user deleted")))
}
