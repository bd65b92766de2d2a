//! Flow tests for the auth crate against in-memory repositories

#[cfg(test)]
mod support {
    use std::sync::{Arc, Mutex};

    use chrono::{DateTime, Utc};
    use kernel::id::{AccessTokenId, UserId};
    use platform::mail::{MailError, Mailer, OutgoingMail};

    use crate::domain::entity::{
        access_token::AccessToken,
        password_reset::PasswordReset,
        user::{NewUser, User},
    };
    use crate::domain::repository::{
        AccessTokenRepository, PasswordResetRepository, UserRepository,
    };
    use crate::domain::value_object::email::Email;
    use crate::error::AuthResult;

    #[derive(Default)]
    pub struct MemoryState {
        pub users: Vec<User>,
        pub tokens: Vec<(AccessToken, [u8; 32])>,
        pub resets: Vec<PasswordReset>,
        next_id: i64,
    }

    impl MemoryState {
        fn next_id(&mut self) -> i64 {
            self.next_id += 1;
            self.next_id
        }
    }

    #[derive(Clone, Default)]
    pub struct MemoryStore {
        pub state: Arc<Mutex<MemoryState>>,
    }

    impl MemoryStore {
        pub fn user(&self, email: &str) -> User {
            self.state
                .lock()
                .unwrap()
                .users
                .iter()
                .find(|u| u.email.as_str() == email)
                .cloned()
                .unwrap()
        }

        pub fn token_count(&self) -> usize {
            self.state.lock().unwrap().tokens.len()
        }

        pub fn reset_for(&self, email: &str) -> Option<PasswordReset> {
            self.state
                .lock()
                .unwrap()
                .resets
                .iter()
                .find(|r| r.email.as_str() == email)
                .cloned()
        }
    }

    impl UserRepository for MemoryStore {
        async fn create(&self, user: &NewUser) -> AuthResult<User> {
            let mut state = self.state.lock().unwrap();
            let now = Utc::now();
            let user = User {
                id: UserId::new(state.next_id()),
                name: user.name.clone(),
                email: user.email.clone(),
                password: user.password.clone(),
                verification_token: Some(user.verification_token.clone()),
                email_verified_at: None,
                created_at: now,
                updated_at: now,
            };
            state.users.push(user.clone());
            Ok(user)
        }

        async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
            let state = self.state.lock().unwrap();
            Ok(state.users.iter().find(|u| u.id == user_id).cloned())
        }

        async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
            let state = self.state.lock().unwrap();
            Ok(state.users.iter().find(|u| &u.email == email).cloned())
        }

        async fn find_by_verification_token(&self, token: &str) -> AuthResult<Option<User>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .users
                .iter()
                .find(|u| u.verification_token.as_ref().map(|t| t.as_str()) == Some(token))
                .cloned())
        }

        async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
            let state = self.state.lock().unwrap();
            Ok(state.users.iter().any(|u| &u.email == email))
        }

        async fn update(&self, user: &User) -> AuthResult<()> {
            let mut state = self.state.lock().unwrap();
            if let Some(slot) = state.users.iter_mut().find(|u| u.id == user.id) {
                *slot = user.clone();
            }
            Ok(())
        }
    }

    impl AccessTokenRepository for MemoryStore {
        async fn create(
            &self,
            user_id: UserId,
            name: &str,
            digest: &[u8; 32],
        ) -> AuthResult<AccessTokenId> {
            let mut state = self.state.lock().unwrap();
            let id = AccessTokenId::new(state.next_id());
            state.tokens.push((
                AccessToken {
                    id,
                    user_id,
                    name: name.to_string(),
                    created_at: Utc::now(),
                    last_used_at: None,
                },
                *digest,
            ));
            Ok(id)
        }

        async fn find_by_digest(&self, digest: &[u8; 32]) -> AuthResult<Option<AccessToken>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .tokens
                .iter()
                .find(|(_, d)| d == digest)
                .map(|(t, _)| t.clone()))
        }

        async fn touch(&self, token_id: AccessTokenId, at: DateTime<Utc>) -> AuthResult<()> {
            let mut state = self.state.lock().unwrap();
            if let Some((token, _)) = state.tokens.iter_mut().find(|(t, _)| t.id == token_id) {
                token.last_used_at = Some(at);
            }
            Ok(())
        }

        async fn delete(&self, token_id: AccessTokenId) -> AuthResult<()> {
            let mut state = self.state.lock().unwrap();
            state.tokens.retain(|(t, _)| t.id != token_id);
            Ok(())
        }

        async fn delete_all_for_user(&self, user_id: UserId) -> AuthResult<u64> {
            let mut state = self.state.lock().unwrap();
            let before = state.tokens.len();
            state.tokens.retain(|(t, _)| t.user_id != user_id);
            Ok((before - state.tokens.len()) as u64)
        }
    }

    impl PasswordResetRepository for MemoryStore {
        async fn upsert(&self, reset: &PasswordReset) -> AuthResult<()> {
            let mut state = self.state.lock().unwrap();
            state.resets.retain(|r| r.email != reset.email);
            state.resets.push(reset.clone());
            Ok(())
        }

        async fn find_by_token(&self, token: &str) -> AuthResult<Option<PasswordReset>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .resets
                .iter()
                .find(|r| r.token.as_str() == token)
                .cloned())
        }

        async fn delete_for_email(&self, email: &Email) -> AuthResult<u64> {
            let mut state = self.state.lock().unwrap();
            let before = state.resets.len();
            state.resets.retain(|r| &r.email != email);
            Ok((before - state.resets.len()) as u64)
        }

        async fn purge_created_before(&self, cutoff: DateTime<Utc>) -> AuthResult<u64> {
            let mut state = self.state.lock().unwrap();
            let before = state.resets.len();
            state.resets.retain(|r| r.created_at > cutoff);
            Ok((before - state.resets.len()) as u64)
        }
    }

    /// Keeps every message; fails every send when `failing`
    #[derive(Clone, Default)]
    pub struct RecordingMailer {
        pub sent: Arc<Mutex<Vec<OutgoingMail>>>,
        pub failing: bool,
    }

    impl RecordingMailer {
        pub fn failing() -> Self {
            Self {
                failing: true,
                ..Self::default()
            }
        }

        pub fn count(&self) -> usize {
            self.sent.lock().unwrap().len()
        }

        pub fn last(&self) -> OutgoingMail {
            self.sent.lock().unwrap().last().cloned().unwrap()
        }
    }

    impl Mailer for RecordingMailer {
        async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
            if self.failing {
                return Err(MailError::InvalidAddress(mail.to));
            }
            self.sent.lock().unwrap().push(mail);
            Ok(())
        }
    }
}

#[cfg(test)]
mod flow_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::support::{MemoryStore, RecordingMailer};
    use crate::application::*;
    use crate::application::notification::{RESET_SUBJECT, VERIFY_SUBJECT};
    use crate::error::AuthError;

    const PASSWORD: &str = "Blue-Kettle-42";

    struct Harness {
        store: Arc<MemoryStore>,
        mailer: RecordingMailer,
        config: Arc<AuthConfig>,
    }

    impl Harness {
        fn new() -> Self {
            Self::with(RecordingMailer::default(), AuthConfig::default())
        }

        fn with(mailer: RecordingMailer, config: AuthConfig) -> Self {
            Self {
                store: Arc::new(MemoryStore::default()),
                mailer,
                config: Arc::new(config),
            }
        }

        fn notifier(&self) -> AuthNotifier<RecordingMailer> {
            AuthNotifier::new(Arc::new(self.mailer.clone()), self.config.clone())
        }

        async fn register(&self, email: &str) -> Result<RegisterOutput, AuthError> {
            RegisterUseCase::new(
                self.store.clone(),
                self.store.clone(),
                self.notifier(),
                self.config.clone(),
            )
            .execute(RegisterInput {
                name: Some("Ada Lovelace".into()),
                email: Some(email.into()),
                password: Some(PASSWORD.into()),
                password_confirmation: Some(PASSWORD.into()),
            })
            .await
        }

        async fn login(&self, email: &str, password: &str) -> Result<LoginOutput, AuthError> {
            LoginUseCase::new(
                self.store.clone(),
                self.store.clone(),
                self.notifier(),
                self.config.clone(),
            )
            .execute(LoginInput {
                email: Some(email.into()),
                password: Some(password.into()),
            })
            .await
        }

        async fn verify(&self, email: &str) -> Result<VerifyEmailOutput, AuthError> {
            let token = self.store.user(email).verification_token.unwrap();
            VerifyEmailUseCase::new(self.store.clone(), self.store.clone())
                .execute(token.as_str())
                .await
        }

        async fn resolve(&self, token: &str) -> Result<Authenticated, AuthError> {
            authenticate(self.store.as_ref(), self.store.as_ref(), token).await
        }
    }

    #[tokio::test]
    async fn test_register_issues_token_and_sends_verification() {
        let h = Harness::new();
        let output = h.register("Ada@Example.com").await.unwrap();

        assert_eq!(output.user.email.as_str(), "ada@example.com");
        assert!(!output.user.is_verified());
        assert_eq!(h.mailer.count(), 1);

        let mail = h.mailer.last();
        assert_eq!(mail.subject, VERIFY_SUBJECT);
        let token = h.store.user("ada@example.com").verification_token.unwrap();
        assert_eq!(token.as_str().len(), 60);
        assert!(mail.text_body.contains(&format!("/verify-email/{}", token.as_str())));

        let caller = h.resolve(output.access_token.as_str()).await.unwrap();
        assert_eq!(caller.user.id, output.user.id);
    }

    #[tokio::test]
    async fn test_register_rejects_taken_email() {
        let h = Harness::new();
        h.register("ada@example.com").await.unwrap();

        match h.register("ADA@example.com").await {
            Err(AuthError::Validation(errors)) => assert_eq!(
                errors.get("email").unwrap(),
                ["The email has already been taken.".to_string()]
            ),
            other => panic!("expected validation error, got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn test_register_reports_every_missing_field() {
        let h = Harness::new();
        let result = RegisterUseCase::new(
            h.store.clone(),
            h.store.clone(),
            h.notifier(),
            h.config.clone(),
        )
        .execute(RegisterInput {
            name: None,
            email: None,
            password: None,
            password_confirmation: None,
        })
        .await;

        let Err(AuthError::Validation(errors)) = result else {
            panic!("expected validation error");
        };
        assert!(errors.has("name"));
        assert!(errors.has("email"));
        assert!(errors.has("password"));
        assert_eq!(h.store.token_count(), 0);
    }

    #[tokio::test]
    async fn test_register_survives_mail_failure() {
        let h = Harness::with(RecordingMailer::failing(), AuthConfig::default());
        let output = h.register("ada@example.com").await;
        assert!(output.is_ok());
    }

    #[tokio::test]
    async fn test_login_of_unverified_user_resends_mail_without_token() {
        let h = Harness::new();
        h.register("ada@example.com").await.unwrap();
        let tokens_before = h.store.token_count();

        let result = h.login("ada@example.com", PASSWORD).await;

        assert!(matches!(result, Err(AuthError::EmailNotVerified)));
        assert_eq!(h.mailer.count(), 2);
        assert_eq!(h.store.token_count(), tokens_before);
    }

    #[tokio::test]
    async fn test_login_with_wrong_password() {
        let h = Harness::new();
        h.register("ada@example.com").await.unwrap();
        h.verify("ada@example.com").await.unwrap();

        let result = h.login("ada@example.com", "Wrong-Kettle-42").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));

        let result = h.login("nobody@example.com", PASSWORD).await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_verify_then_login() {
        let h = Harness::new();
        h.register("ada@example.com").await.unwrap();
        let token = h.store.user("ada@example.com").verification_token.unwrap();

        let output = h.verify("ada@example.com").await.unwrap();
        let VerifyEmailOutput::Verified { access_token } = output else {
            panic!("expected a fresh verification");
        };
        assert!(h.resolve(access_token.as_str()).await.is_ok());

        let user = h.store.user("ada@example.com");
        assert!(user.is_verified());
        assert!(user.verification_token.is_none());

        // token is consumed
        let again = VerifyEmailUseCase::new(h.store.clone(), h.store.clone())
            .execute(token.as_str())
            .await;
        assert!(matches!(again, Err(AuthError::VerificationLinkInvalid)));

        let login = h.login("ada@example.com", PASSWORD).await.unwrap();
        assert_eq!(login.access_token.as_str().len(), 48);
    }

    #[tokio::test]
    async fn test_resend_verification() {
        let h = Harness::new();
        h.register("ada@example.com").await.unwrap();
        let first = h.store.user("ada@example.com").verification_token.unwrap();

        let use_case = ResendVerificationUseCase::new(h.store.clone(), h.notifier());
        let outcome = use_case.execute(Some("ada@example.com".into())).await.unwrap();
        assert_eq!(outcome, ResendOutcome::Sent);
        assert_ne!(h.store.user("ada@example.com").verification_token.unwrap(), first);

        let unknown = use_case.execute(Some("nobody@example.com".into())).await;
        let Err(AuthError::Validation(errors)) = unknown else {
            panic!("expected validation error");
        };
        assert_eq!(
            errors.get("email").unwrap(),
            ["The selected email is invalid.".to_string()]
        );

        h.verify("ada@example.com").await.unwrap();
        let outcome = use_case.execute(Some("ada@example.com".into())).await.unwrap();
        assert_eq!(outcome, ResendOutcome::AlreadyVerified);
    }

    #[tokio::test]
    async fn test_resend_surfaces_mail_failure() {
        let h = Harness::with(RecordingMailer::failing(), AuthConfig::default());
        h.register("ada@example.com").await.unwrap();

        let result = ResendVerificationUseCase::new(h.store.clone(), h.notifier())
            .execute(Some("ada@example.com".into()))
            .await;
        assert!(matches!(result, Err(AuthError::Mail(_))));
    }

    #[tokio::test]
    async fn test_change_password_revokes_other_tokens() {
        let h = Harness::new();
        let registered = h.register("ada@example.com").await.unwrap();
        h.verify("ada@example.com").await.unwrap();
        let user = h.store.user("ada@example.com");

        let use_case =
            ChangePasswordUseCase::new(h.store.clone(), h.store.clone(), h.config.clone());

        let wrong = use_case
            .execute(
                user.clone(),
                ChangePasswordInput {
                    current_password: Some("Not-The-One-1".into()),
                    new_password: Some("Green-Teapot-77".into()),
                    new_password_confirmation: Some("Green-Teapot-77".into()),
                },
            )
            .await;
        assert!(matches!(wrong, Err(AuthError::CurrentPasswordIncorrect)));

        let fresh = use_case
            .execute(
                user,
                ChangePasswordInput {
                    current_password: Some(PASSWORD.into()),
                    new_password: Some("Green-Teapot-77".into()),
                    new_password_confirmation: Some("Green-Teapot-77".into()),
                },
            )
            .await
            .unwrap();

        assert!(h.resolve(registered.access_token.as_str()).await.is_err());
        assert!(h.resolve(fresh.as_str()).await.is_ok());
        assert_eq!(h.store.token_count(), 1);
        assert!(h.login("ada@example.com", "Green-Teapot-77").await.is_ok());
    }

    #[tokio::test]
    async fn test_logout_revokes_only_current_token() {
        let h = Harness::new();
        h.register("ada@example.com").await.unwrap();
        h.verify("ada@example.com").await.unwrap();

        let first = h.login("ada@example.com", PASSWORD).await.unwrap().access_token;
        let second = h.login("ada@example.com", PASSWORD).await.unwrap().access_token;

        let caller = h.resolve(first.as_str()).await.unwrap();
        LogoutUseCase::new(h.store.clone())
            .execute(caller.token_id)
            .await
            .unwrap();

        assert!(matches!(
            h.resolve(first.as_str()).await,
            Err(AuthError::Unauthenticated)
        ));
        assert!(h.resolve(second.as_str()).await.is_ok());
    }

    #[tokio::test]
    async fn test_reset_password_token_is_single_use() {
        let h = Harness::new();
        let registered = h.register("ada@example.com").await.unwrap();

        SendResetLinkUseCase::new(h.store.clone(), h.store.clone(), h.notifier())
            .execute(Some("ada@example.com".into()))
            .await
            .unwrap();

        let reset = h.store.reset_for("ada@example.com").unwrap();
        let mail = h.mailer.last();
        assert_eq!(mail.subject, RESET_SUBJECT);
        assert!(mail.text_body.contains(&format!(
            "/reset-password?token={}&email=ada%40example.com",
            reset.token.as_str()
        )));

        let use_case = ResetPasswordUseCase::new(
            h.store.clone(),
            h.store.clone(),
            h.store.clone(),
            h.config.clone(),
        );
        let input = || ResetPasswordInput {
            token: reset.token.as_str().to_string(),
            password: Some("Green-Teapot-77".into()),
            password_confirmation: Some("Green-Teapot-77".into()),
        };

        use_case.execute(input()).await.unwrap();
        assert!(h.store.reset_for("ada@example.com").is_none());
        assert!(h.resolve(registered.access_token.as_str()).await.is_err());

        let second = use_case.execute(input()).await;
        assert!(matches!(second, Err(AuthError::ResetTokenInvalid)));
    }

    #[tokio::test]
    async fn test_reset_password_rejects_expired_token() {
        let config = AuthConfig {
            reset_token_ttl: Duration::ZERO,
            ..AuthConfig::default()
        };
        let h = Harness::with(RecordingMailer::default(), config);
        h.register("ada@example.com").await.unwrap();

        SendResetLinkUseCase::new(h.store.clone(), h.store.clone(), h.notifier())
            .execute(Some("ada@example.com".into()))
            .await
            .unwrap();
        let token = h.store.reset_for("ada@example.com").unwrap().token;

        let result = ResetPasswordUseCase::new(
            h.store.clone(),
            h.store.clone(),
            h.store.clone(),
            h.config.clone(),
        )
        .execute(ResetPasswordInput {
            token: token.into_string(),
            password: Some("Green-Teapot-77".into()),
            password_confirmation: Some("Green-Teapot-77".into()),
        })
        .await;

        assert!(matches!(result, Err(AuthError::ResetTokenInvalid)));
        assert!(h.store.reset_for("ada@example.com").is_none());
    }

    #[tokio::test]
    async fn test_send_reset_link_requires_known_email() {
        let h = Harness::new();
        let result = SendResetLinkUseCase::new(h.store.clone(), h.store.clone(), h.notifier())
            .execute(Some("nobody@example.com".into()))
            .await;
        assert!(matches!(result, Err(AuthError::Validation(_))));
        assert_eq!(h.mailer.count(), 0);
    }
}

#[cfg(test)]
mod router_tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::support::{MemoryStore, RecordingMailer};
    use crate::application::config::AuthConfig;
    use crate::presentation::router::auth_router_generic;

    fn app(store: MemoryStore) -> axum::Router {
        auth_router_generic(store, RecordingMailer::default(), AuthConfig::default())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_user_requires_bearer_token() {
        let response = app(MemoryStore::default())
            .oneshot(Request::builder().uri("/user").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["message"], "Unauthenticated.");
    }

    #[tokio::test]
    async fn test_register_then_fetch_user() {
        let store = MemoryStore::default();
        let response = app(store.clone())
            .oneshot(post_json(
                "/register",
                json!({
                    "name": "Ada Lovelace",
                    "email": "ada@example.com",
                    "password": "Blue-Kettle-42",
                    "password_confirmation": "Blue-Kettle-42"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(
            body["message"],
            "User registered successfully. Please verify your email."
        );
        assert_eq!(body["token_type"], "Bearer");
        let token = body["access_token"].as_str().unwrap().to_string();

        let response = app(store)
            .oneshot(
                Request::builder()
                    .uri("/user")
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["email"], "ada@example.com");
        assert!(body["email_verified_at"].is_null());
    }

    #[tokio::test]
    async fn test_login_errors_use_field_map() {
        let response = app(MemoryStore::default())
            .oneshot(post_json(
                "/login",
                json!({"email": "ada@example.com", "password": "whatever"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(
            body["errors"]["email"][0],
            "The provided credentials are incorrect."
        );
    }

    #[tokio::test]
    async fn test_malformed_json_body_is_a_json_error() {
        let request = Request::builder()
            .method("POST")
            .uri("/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"email\": "))
            .unwrap();
        let response = app(MemoryStore::default()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        let body = body_json(response).await;
        assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));

        let request = Request::builder()
            .method("POST")
            .uri("/send-reset-password-email")
            .header(header::CONTENT_TYPE, "text/plain")
            .body(Body::from("email=ada@example.com"))
            .unwrap();
        let response = app(MemoryStore::default()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["message"].is_string());
    }

    #[tokio::test]
    async fn test_unknown_verification_link_is_gone() {
        let response = app(MemoryStore::default())
            .oneshot(
                Request::builder()
                    .uri("/verify-email/not-a-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::GONE);
        let body = body_json(response).await;
        assert_eq!(body["status"], "expired");
        assert_eq!(body["message"], "Verification link has expired or is invalid.");
    }

    #[tokio::test]
    async fn test_unknown_reset_token_is_not_found() {
        let response = app(MemoryStore::default())
            .oneshot(post_json(
                "/reset-password/unknown",
                json!({"password": "Green-Teapot-77", "password_confirmation": "Green-Teapot-77"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Token is invalid or expired");
        assert_eq!(body["status"], "failed");
    }
}

#[cfg(test)]
mod error_tests {
    use axum::http::StatusCode;
    use kernel::validation::FieldErrors;

    use crate::error::AuthError;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AuthError::Validation(FieldErrors::single("name", "x")).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(AuthError::EmailNotVerified.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::VerificationLinkInvalid.status_code(), StatusCode::GONE);
        assert_eq!(AuthError::ResetTokenInvalid.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AuthError::Unauthenticated.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AuthError::Mail("down".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AuthError::InvalidRequest("bad json".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_bodies() {
        let body = AuthError::EmailNotVerified.to_app_error().to_body();
        assert_eq!(body["message"], "email_not_verified");

        let body = AuthError::CurrentPasswordIncorrect.to_app_error().to_body();
        assert_eq!(
            body["errors"]["current_password"][0],
            "Current password is incorrect"
        );

        // internals are not exposed
        let body = AuthError::Internal("pool exploded".into()).to_app_error().to_body();
        assert_eq!(body["message"], "Internal server error");
    }
}
