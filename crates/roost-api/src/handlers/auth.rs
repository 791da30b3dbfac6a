//! Authentication handlers
//!
//! Registration creates the user together with an empty wallet, so
//! every account can fund immediately after email verification.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::dto::{
    AuthResponse, EmailRequest, GoogleAuthRequest, LoginRequest, MessageResponse, RegisterRequest,
    ResetPasswordRequest, SendPhoneOtpRequest, UpdateProfileRequest, UserProfile,
    VerifyEmailRequest, VerifyPhoneRequest,
};
use crate::error::{ApiError, ApiResult};
use crate::extractors::{AuthenticatedUser, ValidatedJson};
use crate::state::AppState;

/// Register a password account and send an email OTP
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created, OTP sent", body = AuthResponse),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let password_hash = state.auth.password.hash_password(&request.password)?;
    let otp = state.auth.otp.generate();

    let user = state
        .db
        .user_repo()
        .create(
            &request.email,
            &request.fullname,
            &password_hash,
            &otp.code,
            otp.expires_at,
        )
        .await?;

    state.db.wallet_repo().create(user.id).await?;

    state
        .auth
        .notifier
        .send_email_otp(&user.email, &otp.code)
        .await?;

    let role = user.role.parse().unwrap_or_default();
    let token = state.auth.jwt.generate_token(user.id, &user.email, role)?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let user = state
        .db
        .user_repo()
        .find_by_email(&request.email)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    // Google-only accounts have no password to check
    let hash = user
        .password_hash
        .as_deref()
        .ok_or(ApiError::InvalidCredentials)?;

    if !state.auth.password.verify_password(&request.password, hash)? {
        return Err(ApiError::InvalidCredentials);
    }

    let role = user.role.parse().unwrap_or_default();
    let token = state.auth.jwt.generate_token(user.id, &user.email, role)?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// Sign in with a Google identity, creating or linking the account
#[utoipa::path(
    post,
    path = "/api/v1/auth/google",
    tag = "Auth",
    request_body = GoogleAuthRequest,
    responses(
        (status = 200, description = "Signed in", body = AuthResponse)
    )
)]
pub async fn google_auth(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<GoogleAuthRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let existed = state
        .db
        .user_repo()
        .find_by_email(&request.email)
        .await?
        .is_some();

    let user = state
        .db
        .user_repo()
        .upsert_google(&request.google_id, &request.email, &request.fullname)
        .await?;

    if !existed {
        state.db.wallet_repo().create(user.id).await?;
    }

    let role = user.role.parse().unwrap_or_default();
    let token = state.auth.jwt.generate_token(user.id, &user.email, role)?;

    tracing::info!(user_id = %user.id, linked = existed, "Google sign-in");

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// Confirm an email OTP and mark the address verified
#[utoipa::path(
    post,
    path = "/api/v1/auth/verify-email",
    tag = "Auth",
    request_body = VerifyEmailRequest,
    responses(
        (status = 200, description = "Email verified", body = UserProfile),
        (status = 400, description = "Wrong or expired code")
    )
)]
pub async fn verify_email(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<VerifyEmailRequest>,
) -> ApiResult<Json<UserProfile>> {
    let user = state
        .db
        .user_repo()
        .find_by_email(&request.email)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    let (stored, expires_at) = match (user.email_otp.as_deref(), user.otp_expires_at) {
        (Some(stored), Some(expires_at)) => (stored, expires_at),
        _ => return Err(ApiError::Validation("no pending verification".to_string())),
    };

    state.auth.otp.verify(&request.otp, stored, expires_at)?;

    let user = state.db.user_repo().mark_email_verified(&user.email).await?;

    Ok(Json(user.into()))
}

/// Issue a fresh email OTP
#[utoipa::path(
    post,
    path = "/api/v1/auth/resend-otp",
    tag = "Auth",
    request_body = EmailRequest,
    responses(
        (status = 200, description = "OTP sent", body = MessageResponse)
    )
)]
pub async fn resend_otp(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<EmailRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let user = state
        .db
        .user_repo()
        .find_by_email(&request.email)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    let otp = state.auth.otp.generate();
    state
        .db
        .user_repo()
        .set_email_otp(&user.email, &otp.code, otp.expires_at)
        .await?;
    state
        .auth
        .notifier
        .send_email_otp(&user.email, &otp.code)
        .await?;

    Ok(Json(MessageResponse::new("verification code sent")))
}

/// Start a password reset by sending an OTP
#[utoipa::path(
    post,
    path = "/api/v1/auth/forgot-password",
    tag = "Auth",
    request_body = EmailRequest,
    responses(
        (status = 200, description = "Reset code sent if the account exists", body = MessageResponse)
    )
)]
pub async fn forgot_password(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<EmailRequest>,
) -> ApiResult<Json<MessageResponse>> {
    // Same response whether or not the account exists
    if let Some(user) = state.db.user_repo().find_by_email(&request.email).await? {
        let otp = state.auth.otp.generate();
        state
            .db
            .user_repo()
            .set_email_otp(&user.email, &otp.code, otp.expires_at)
            .await?;
        state
            .auth
            .notifier
            .send_password_reset(&user.email, &otp.code)
            .await?;
    }

    Ok(Json(MessageResponse::new(
        "if the account exists, a reset code was sent",
    )))
}

/// Complete a password reset with the emailed OTP
#[utoipa::path(
    post,
    path = "/api/v1/auth/reset-password",
    tag = "Auth",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password updated", body = MessageResponse),
        (status = 400, description = "Wrong or expired code")
    )
)]
pub async fn reset_password(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<ResetPasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let user = state
        .db
        .user_repo()
        .find_by_email(&request.email)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    let (stored, expires_at) = match (user.email_otp.as_deref(), user.otp_expires_at) {
        (Some(stored), Some(expires_at)) => (stored, expires_at),
        _ => return Err(ApiError::Validation("no pending reset".to_string())),
    };

    state.auth.otp.verify(&request.otp, stored, expires_at)?;

    let password_hash = state.auth.password.hash_password(&request.new_password)?;
    state
        .db
        .user_repo()
        .reset_password(&user.email, &password_hash)
        .await?;

    tracing::info!(user_id = %user.id, "Password reset");

    Ok(Json(MessageResponse::new("password updated")))
}

/// Attach a phone number and send an SMS OTP
#[utoipa::path(
    post,
    path = "/api/v1/auth/phone/send-otp",
    tag = "Auth",
    request_body = SendPhoneOtpRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "OTP sent", body = MessageResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn send_phone_otp(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(user): AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<SendPhoneOtpRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let otp = state.auth.otp.generate();
    state
        .db
        .user_repo()
        .set_phone_otp(user.user_id, &request.phone, &otp.code, otp.expires_at)
        .await?;
    state
        .auth
        .notifier
        .send_sms_otp(&request.phone, &otp.code)
        .await?;

    Ok(Json(MessageResponse::new("verification code sent")))
}

/// Confirm the SMS OTP and mark the phone verified
#[utoipa::path(
    post,
    path = "/api/v1/auth/phone/verify",
    tag = "Auth",
    request_body = VerifyPhoneRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Phone verified", body = UserProfile),
        (status = 400, description = "Wrong or expired code"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn verify_phone(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(auth): AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<VerifyPhoneRequest>,
) -> ApiResult<Json<UserProfile>> {
    let user = state
        .db
        .user_repo()
        .find_by_id(auth.user_id)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    let (stored, expires_at) = match (user.phone_otp.as_deref(), user.otp_expires_at) {
        (Some(stored), Some(expires_at)) => (stored, expires_at),
        _ => return Err(ApiError::Validation("no pending verification".to_string())),
    };

    state.auth.otp.verify(&request.otp, stored, expires_at)?;

    let user = state.db.user_repo().mark_phone_verified(user.id).await?;

    Ok(Json(user.into()))
}

/// The requesting user's profile
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Auth",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Profile", body = UserProfile),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn me(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(auth): AuthenticatedUser,
) -> ApiResult<Json<UserProfile>> {
    let user = state
        .db
        .user_repo()
        .find_by_id(auth.user_id)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    Ok(Json(user.into()))
}

/// Update the requesting user's profile
#[utoipa::path(
    put,
    path = "/api/v1/auth/profile",
    tag = "Auth",
    request_body = UpdateProfileRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Profile updated", body = UserProfile),
        (status = 400, description = "Invalid fields"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(auth): AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<UserProfile>> {
    let user = state
        .db
        .user_repo()
        .update_profile(
            auth.user_id,
            request.fullname.as_deref(),
            request.phone.as_deref(),
        )
        .await?;

    tracing::info!(user_id = %user.id, "Profile updated");

    Ok(Json(user.into()))
}

/// Submit the account for KYC review
#[utoipa::path(
    post,
    path = "/api/v1/auth/kyc/submit",
    tag = "Auth",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Submitted for review", body = UserProfile),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn submit_kyc(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(auth): AuthenticatedUser,
) -> ApiResult<Json<UserProfile>> {
    let user = state
        .db
        .user_repo()
        .update_kyc_status(auth.user_id, roost_types::KycStatus::Pending)
        .await?;

    tracing::info!(user_id = %user.id, "KYC submitted");

    Ok(Json(user.into()))
}
