//! HTTP Handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use platform::mail::Mailer;

use crate::application::config::AuthConfig;
use crate::application::{
    Authenticated, AuthNotifier, ChangePasswordInput, ChangePasswordUseCase, LoginInput,
    LoginUseCase, LogoutUseCase, RegisterInput, RegisterUseCase, ResendOutcome,
    ResendVerificationUseCase, ResetPasswordInput, ResetPasswordUseCase, SendResetLinkUseCase,
    VerifyEmailOutput, VerifyEmailUseCase,
};
use crate::domain::repository::{AccessTokenRepository, PasswordResetRepository, UserRepository};
use crate::error::AuthResult;
use crate::presentation::extract::JsonBody;
use crate::presentation::dto::{
    ChangePasswordRequest, EmailRequest, LoginRequest, LoginResponse, MessageResponse,
    RegisterRequest, ResetPasswordRequest, TOKEN_TYPE, TokenResponse, UserResponse,
    VerifyEmailResponse,
};

/// Every repository the auth handlers need, implemented by one store
pub trait AuthRepositories:
    UserRepository + AccessTokenRepository + PasswordResetRepository + Clone + Send + Sync + 'static
{
}

impl<T> AuthRepositories for T where
    T: UserRepository
        + AccessTokenRepository
        + PasswordResetRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}

/// Shared state for auth handlers
pub struct AuthAppState<R, M>
where
    R: AuthRepositories,
    M: Mailer + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub mailer: Arc<M>,
    pub config: Arc<AuthConfig>,
}

impl<R, M> Clone for AuthAppState<R, M>
where
    R: AuthRepositories,
    M: Mailer + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            mailer: self.mailer.clone(),
            config: self.config.clone(),
        }
    }
}

impl<R, M> AuthAppState<R, M>
where
    R: AuthRepositories,
    M: Mailer + Send + Sync + 'static,
{
    fn notifier(&self) -> AuthNotifier<M> {
        AuthNotifier::new(self.mailer.clone(), self.config.clone())
    }
}

// ============================================================================
// Register / Login
// ============================================================================

/// POST /api/register
pub async fn register<R, M>(
    State(state): State<AuthAppState<R, M>>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: AuthRepositories,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.notifier(),
        state.config.clone(),
    );

    let output = use_case
        .execute(RegisterInput {
            name: req.name,
            email: req.email,
            password: req.password,
            password_confirmation: req.password_confirmation,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse::new(
            "User registered successfully. Please verify your email.",
            output.access_token,
        )),
    ))
}

/// POST /api/login
pub async fn login<R, M>(
    State(state): State<AuthAppState<R, M>>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: AuthRepositories,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.notifier(),
        state.config.clone(),
    );

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        access_token: output.access_token.into_string(),
        token_type: TOKEN_TYPE,
        user: UserResponse::from(&output.user),
    }))
}

// ============================================================================
// Email Verification
// ============================================================================

/// GET /api/verify-email/{token}
pub async fn verify_email<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Path(token): Path<String>,
) -> AuthResult<Json<VerifyEmailResponse>>
where
    R: AuthRepositories,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = VerifyEmailUseCase::new(state.repo.clone(), state.repo.clone());

    let response = match use_case.execute(&token).await? {
        VerifyEmailOutput::Verified { access_token } => VerifyEmailResponse {
            message: "Email verified successfully.",
            access_token: Some(access_token.into_string()),
            token_type: Some(TOKEN_TYPE),
            status: "success",
        },
        VerifyEmailOutput::AlreadyVerified => VerifyEmailResponse {
            message: "Email already verified.",
            access_token: None,
            token_type: None,
            status: "already_verified",
        },
    };

    Ok(Json(response))
}

/// POST /api/resend-verification-email
pub async fn resend_verification<R, M>(
    State(state): State<AuthAppState<R, M>>,
    JsonBody(req): JsonBody<EmailRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AuthRepositories,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = ResendVerificationUseCase::new(state.repo.clone(), state.notifier());

    let response = match use_case.execute(req.email).await? {
        ResendOutcome::Sent => MessageResponse::with_status(
            "A fresh verification link has been sent to your email.",
            "success",
        ),
        ResendOutcome::AlreadyVerified => {
            MessageResponse::with_status("Email already verified.", "already_verified")
        }
    };

    Ok(Json(response))
}

// ============================================================================
// Password Reset
// ============================================================================

/// POST /api/send-reset-password-email
pub async fn send_reset_link<R, M>(
    State(state): State<AuthAppState<R, M>>,
    JsonBody(req): JsonBody<EmailRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AuthRepositories,
    M: Mailer + Send + Sync + 'static,
{
    let use_case =
        SendResetLinkUseCase::new(state.repo.clone(), state.repo.clone(), state.notifier());
    use_case.execute(req.email).await?;

    Ok(Json(MessageResponse::with_status(
        "Password reset link sent to your email",
        "success",
    )))
}

/// POST /api/reset-password/{token}
pub async fn reset_password<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Path(token): Path<String>,
    JsonBody(req): JsonBody<ResetPasswordRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AuthRepositories,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = ResetPasswordUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    use_case
        .execute(ResetPasswordInput {
            token,
            password: req.password,
            password_confirmation: req.password_confirmation,
        })
        .await?;

    Ok(Json(MessageResponse::with_status(
        "Password reset successfully",
        "success",
    )))
}

// ============================================================================
// Authenticated
// ============================================================================

/// POST /api/change-password
pub async fn change_password<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Extension(auth): Extension<Authenticated>,
    JsonBody(req): JsonBody<ChangePasswordRequest>,
) -> AuthResult<Json<TokenResponse>>
where
    R: AuthRepositories,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = ChangePasswordUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    let token = use_case
        .execute(
            auth.user,
            ChangePasswordInput {
                current_password: req.current_password,
                new_password: req.new_password,
                new_password_confirmation: req.new_password_confirmation,
            },
        )
        .await?;

    Ok(Json(TokenResponse::new("Password changed successfully", token)))
}

/// POST /api/logout
pub async fn logout<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Extension(auth): Extension<Authenticated>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AuthRepositories,
    M: Mailer + Send + Sync + 'static,
{
    LogoutUseCase::new(state.repo.clone())
        .execute(auth.token_id)
        .await?;

    Ok(Json(MessageResponse::new("Logged out successfully")))
}

/// GET /api/user
pub async fn current_user(Extension(auth): Extension<Authenticated>) -> Json<UserResponse> {
    Json(UserResponse::from(&auth.user))
}
