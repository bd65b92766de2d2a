//! Store tests against a local fake API

#[cfg(test)]
mod support {
    use axum::Router;
    use serde_json::{Value, json};

    use crate::api::ApiClient;

    /// Serve `routes` under `/api` on an ephemeral port
    pub async fn serve(routes: Router) -> ApiClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new().nest("/api", routes);
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        ApiClient::new(&format!("http://{addr}/api")).unwrap()
    }

    pub fn brand(id: i64, slug: &str, name: &str) -> Value {
        json!({
            "id": id,
            "slug": slug,
            "name": name,
            "status": "active",
            "created_at": "1 minute ago",
            "updated_at": "2024-05-01 10:00:00"
        })
    }

    pub fn user() -> Value {
        json!({
            "id": 1,
            "name": "Ada",
            "email": "ada@example.com",
            "email_verified_at": "2024-05-01T10:00:00Z",
            "created_at": "2024-05-01T09:00:00Z",
            "updated_at": "2024-05-01T10:00:00Z"
        })
    }
}

#[cfg(test)]
mod store_tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use axum::body::Bytes;
    use axum::extract::Query;
    use axum::http::{HeaderMap, StatusCode, header};
    use axum::routing::{delete, get};
    use axum::{Json, Router};
    use kernel::query::ListParams;
    use serde_json::{Value, json};

    use super::support::{brand, serve};
    use crate::form::FormData;
    use crate::model::Brand;
    use crate::store::ResourceStore;

    fn list_body() -> Value {
        json!({
            "data": [brand(1, "aaaa1111", "Acme"), brand(2, "bbbb2222", "Bolt")],
            "meta": {"current_page": 2, "last_page": 3, "per_page": 2, "total": 6}
        })
    }

    #[tokio::test]
    async fn test_fetch_list_sends_query_and_token() {
        let seen: Arc<Mutex<Option<(Option<String>, HashMap<String, String>)>>> = Arc::default();
        let capture = seen.clone();

        let routes = Router::new().route(
            "/brands",
            get(move |headers: HeaderMap, Query(query): Query<HashMap<String, String>>| {
                let capture = capture.clone();
                async move {
                    let auth = headers
                        .get(header::AUTHORIZATION)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    *capture.lock().unwrap() = Some((auth, query));
                    Json(list_body())
                }
            }),
        );
        let api = serve(routes).await;
        api.set_token(Some("secret-token".into()));

        let mut store = ResourceStore::<Brand>::new(api);
        store
            .fetch_list(&ListParams {
                page: Some(2),
                per_page: Some(2),
                status: Some("active".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(store.items().len(), 2);
        assert_eq!(store.items()[1].name, "Bolt");
        assert_eq!(store.pagination().unwrap().last_page, 3);
        assert!(!store.is_loading());

        let (auth, query) = seen.lock().unwrap().clone().unwrap();
        assert_eq!(auth.as_deref(), Some("Bearer secret-token"));
        assert_eq!(query.get("page").map(String::as_str), Some("2"));
        assert_eq!(query.get("status").map(String::as_str), Some("active"));
        assert!(!query.contains_key("search"));
    }

    #[tokio::test]
    async fn test_create_keeps_field_errors_until_reset() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let routes = Router::new().route(
            "/brands",
            axum::routing::post(move |_body: Bytes| {
                let counter = counter.clone();
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                        (
                            StatusCode::UNPROCESSABLE_ENTITY,
                            Json(json!({
                                "message": "Validation errors",
                                "errors": {"name": ["The name has already been taken."]}
                            })),
                        )
                    } else {
                        (StatusCode::CREATED, Json(json!({"data": brand(3, "cccc3333", "Crest")})))
                    }
                }
            }),
        );
        let mut store = ResourceStore::<Brand>::new(serve(routes).await);
        let form = FormData::new().field("name", "Acme").field("status", "active");

        let err = store.create(form.clone()).await.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::UNPROCESSABLE_ENTITY));
        assert!(store.errors().has("name"));

        let created = store.create(form).await.unwrap();
        assert_eq!(created.slug, "cccc3333");
        assert!(store.errors().is_empty());
        assert_eq!(store.items()[0].slug, "cccc3333");
        assert_eq!(store.current().unwrap().name, "Crest");
    }

    #[tokio::test]
    async fn test_delete_drops_cached_items() {
        let bulk: Arc<Mutex<Option<Value>>> = Arc::default();
        let capture = bulk.clone();

        let routes = Router::new()
            .route("/brands", get(|| async { Json(list_body()) }))
            .route(
                "/brands/multiple",
                delete(move |Json(body): Json<Value>| {
                    let capture = capture.clone();
                    async move {
                        *capture.lock().unwrap() = Some(body);
                        StatusCode::NO_CONTENT
                    }
                }),
            )
            .route(
                "/brands/{slug}",
                delete(|| async { Json(json!({"message": "Brand deleted successfully."})) }),
            );
        let mut store = ResourceStore::<Brand>::new(serve(routes).await);
        store.fetch_list(&ListParams::default()).await.unwrap();

        let message = store.delete("aaaa1111").await.unwrap();
        assert_eq!(message, "Brand deleted successfully.");
        assert_eq!(store.items().len(), 1);

        store.fetch_list(&ListParams::default()).await.unwrap();
        store
            .delete_multiple(&["aaaa1111".to_string(), "bbbb2222".to_string()])
            .await
            .unwrap();
        assert!(store.items().is_empty());
        assert_eq!(
            bulk.lock().unwrap().clone().unwrap(),
            json!({"slugs": ["aaaa1111", "bbbb2222"]})
        );
    }

    #[tokio::test]
    async fn test_fetch_one_and_active() {
        let routes = Router::new()
            .route(
                "/brands/active",
                get(|| async {
                    Json(json!({"data": [{"id": 1, "slug": "aaaa1111", "name": "Acme"}]}))
                }),
            )
            .route(
                "/brands/{slug}",
                get(|| async {
                    (
                        StatusCode::NOT_FOUND,
                        Json(json!({"message": "Brand not found."})),
                    )
                }),
            );
        let mut store = ResourceStore::<Brand>::new(serve(routes).await);

        store.fetch_active().await.unwrap();
        assert_eq!(store.active()[0].name, "Acme");

        let err = store.fetch_one("missing1").await.unwrap_err();
        assert_eq!(err.to_string(), "Brand not found.");
        assert!(store.current().is_none());
    }
}

#[cfg(test)]
mod auth_tests {
    use std::sync::{Arc, Mutex};

    use axum::http::{HeaderMap, StatusCode, header};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;

    use super::support::{serve, user};
    use crate::auth::{AuthStore, LoginOutcome, VerificationStatus};

    #[tokio::test]
    async fn test_unverified_login_stores_no_token() {
        let routes = Router::new().route(
            "/login",
            post(|| async {
                (
                    StatusCode::FORBIDDEN,
                    Json(json!({"message": "email_not_verified"})),
                )
            }),
        );
        let api = serve(routes).await;
        api.set_token(Some("stale".into()));
        let mut auth = AuthStore::new(api);

        let outcome = auth.login("ada@example.com", "Secret123!").await.unwrap();
        assert_eq!(outcome, LoginOutcome::EmailNotVerified);
        assert!(auth.token().is_none());
        assert!(!auth.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_then_user_uses_token() {
        let seen: Arc<Mutex<Option<String>>> = Arc::default();
        let capture = seen.clone();

        let routes = Router::new()
            .route(
                "/login",
                post(|| async {
                    Json(json!({"access_token": "tok-1", "token_type": "Bearer", "user": user()}))
                }),
            )
            .route(
                "/user",
                get(move |headers: HeaderMap| {
                    let capture = capture.clone();
                    async move {
                        *capture.lock().unwrap() = headers
                            .get(header::AUTHORIZATION)
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string);
                        Json(user())
                    }
                }),
            );
        let mut auth = AuthStore::new(serve(routes).await);

        let LoginOutcome::Authenticated(user) = auth.login("ada@example.com", "pw").await.unwrap()
        else {
            panic!("expected authenticated");
        };
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(auth.token().as_deref(), Some("tok-1"));

        auth.fetch_user().await.unwrap();
        assert_eq!(seen.lock().unwrap().as_deref(), Some("Bearer tok-1"));
    }

    #[tokio::test]
    async fn test_wrong_credentials_surface_errors() {
        let routes = Router::new().route(
            "/login",
            post(|| async {
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({
                        "message": "The provided credentials are incorrect.",
                        "errors": {"email": ["The provided credentials are incorrect."]}
                    })),
                )
            }),
        );
        let mut auth = AuthStore::new(serve(routes).await);

        assert!(auth.login("ada@example.com", "nope").await.is_err());
        assert!(auth.errors().has("email"));
        assert!(auth.user().is_none());
    }

    #[tokio::test]
    async fn test_logout_forgets_token_even_on_failure() {
        let routes = Router::new().route(
            "/logout",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"message": "Internal server error"})),
                )
            }),
        );
        let api = serve(routes).await;
        api.set_token(Some("tok-1".into()));
        let mut auth = AuthStore::new(api);

        assert!(auth.logout().await.is_err());
        assert!(auth.token().is_none());
    }

    #[tokio::test]
    async fn test_verify_email_outcomes() {
        let routes = Router::new().route(
            "/verify-email/{token}",
            get(|axum::extract::Path(token): axum::extract::Path<String>| async move {
                if token == "good" {
                    (
                        StatusCode::OK,
                        Json(json!({
                            "message": "Email verified successfully.",
                            "access_token": "tok-2",
                            "token_type": "Bearer",
                            "status": "success"
                        })),
                    )
                } else {
                    (
                        StatusCode::GONE,
                        Json(json!({
                            "message": "Verification link has expired or is invalid.",
                            "status": "expired"
                        })),
                    )
                }
            }),
        );
        let mut auth = AuthStore::new(serve(routes).await);

        let (status, _) = auth.verify_email("stale").await.unwrap();
        assert_eq!(status, VerificationStatus::Expired);
        assert!(auth.token().is_none());

        let (status, message) = auth.verify_email("good").await.unwrap();
        assert_eq!(status, VerificationStatus::Success);
        assert_eq!(message, "Email verified successfully.");
        assert_eq!(auth.token().as_deref(), Some("tok-2"));
    }
}
