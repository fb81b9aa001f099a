//! Back-office scenarios through the guarded admin router: authentication,
//! blog publishing and consultation ticket handling.

mod common {
    use std::sync::{Arc, Mutex};

    use axum::response::Response;
    use axum::Router;
    use serde_json::Value;

    use divorce_prep::admin::admin_router;
    use divorce_prep::auth::{AuthenticatedUser, Role, StaticSessionDirectory};
    use divorce_prep::config::AdminConfig;
    use divorce_prep::consultation::{
        consultation_router, ConsultationRepository, ConsultationService, ConsultationTicket,
        TicketId,
    };
    use divorce_prep::content::blog::{
        blog_router, BlogPost, BlogRepository, BlogService, PostId,
    };
    use divorce_prep::store::RepositoryError;

    pub const ADMIN_TOKEN: &str = "backoffice-admin";
    pub const MEMBER_TOKEN: &str = "backoffice-member";

    #[derive(Default, Clone)]
    pub struct Posts(Arc<Mutex<Vec<BlogPost>>>);

    impl BlogRepository for Posts {
        fn insert(&self, post: BlogPost) -> Result<BlogPost, RepositoryError> {
            self.0.lock().expect("mutex").push(post.clone());
            Ok(post)
        }

        fn update(&self, post: BlogPost) -> Result<(), RepositoryError> {
            let mut guard = self.0.lock().expect("mutex");
            let slot = guard
                .iter_mut()
                .find(|existing| existing.id == post.id)
                .ok_or(RepositoryError::NotFound)?;
            *slot = post;
            Ok(())
        }

        fn delete(&self, id: &PostId) -> Result<(), RepositoryError> {
            let mut guard = self.0.lock().expect("mutex");
            let before = guard.len();
            guard.retain(|post| &post.id != id);
            if guard.len() == before {
                Err(RepositoryError::NotFound)
            } else {
                Ok(())
            }
        }

        fn fetch(&self, id: &PostId) -> Result<Option<BlogPost>, RepositoryError> {
            let guard = self.0.lock().expect("mutex");
            Ok(guard.iter().find(|post| &post.id == id).cloned())
        }

        fn fetch_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, RepositoryError> {
            let guard = self.0.lock().expect("mutex");
            Ok(guard.iter().find(|post| post.slug == slug).cloned())
        }

        fn list(&self) -> Result<Vec<BlogPost>, RepositoryError> {
            Ok(self.0.lock().expect("mutex").clone())
        }

        fn increment_views(&self, id: &PostId) -> Result<BlogPost, RepositoryError> {
            let mut guard = self.0.lock().expect("mutex");
            let post = guard
                .iter_mut()
                .find(|post| &post.id == id)
                .ok_or(RepositoryError::NotFound)?;
            post.view_count += 1;
            Ok(post.clone())
        }
    }

    #[derive(Default, Clone)]
    pub struct Tickets(Arc<Mutex<Vec<ConsultationTicket>>>);

    impl ConsultationRepository for Tickets {
        fn insert(
            &self,
            ticket: ConsultationTicket,
        ) -> Result<ConsultationTicket, RepositoryError> {
            self.0.lock().expect("mutex").push(ticket.clone());
            Ok(ticket)
        }

        fn update(&self, ticket: ConsultationTicket) -> Result<(), RepositoryError> {
            let mut guard = self.0.lock().expect("mutex");
            let slot = guard
                .iter_mut()
                .find(|existing| existing.id == ticket.id)
                .ok_or(RepositoryError::NotFound)?;
            *slot = ticket;
            Ok(())
        }

        fn fetch(&self, id: &TicketId) -> Result<Option<ConsultationTicket>, RepositoryError> {
            let guard = self.0.lock().expect("mutex");
            Ok(guard.iter().find(|ticket| &ticket.id == id).cloned())
        }

        fn list(&self) -> Result<Vec<ConsultationTicket>, RepositoryError> {
            Ok(self.0.lock().expect("mutex").clone())
        }
    }

    pub fn app() -> Router {
        let directory = StaticSessionDirectory::from_config(&AdminConfig {
            admin_tokens: vec![ADMIN_TOKEN.to_string()],
        });
        directory.insert(
            MEMBER_TOKEN,
            AuthenticatedUser {
                user_id: "member-42".to_string(),
                role: Role::parse("user"),
            },
        );

        let blog = Arc::new(BlogService::new(Arc::new(Posts::default())));
        let consultations = Arc::new(ConsultationService::new(Arc::new(Tickets::default())));

        blog_router(blog.clone())
            .merge(consultation_router(consultations.clone()))
            .merge(admin_router(blog, consultations, Arc::new(directory)))
    }

    pub async fn json_body(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }
}

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{app, json_body, ADMIN_TOKEN, MEMBER_TOKEN};

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    };
    request.expect("request builds")
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.expect("route executes");
    let status = response.status();
    if status == StatusCode::NO_CONTENT {
        return (status, Value::Null);
    }
    (status, json_body(response).await)
}

#[tokio::test]
async fn admin_routes_distinguish_unauthenticated_from_unauthorized() {
    let router = app();

    let (status, body) = send(&router, request(Method::GET, "/api/admin/posts", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let (status, _) = send(
        &router,
        request(Method::GET, "/api/admin/posts", Some("forged"), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &router,
        request(Method::GET, "/api/admin/consultations", Some(MEMBER_TOKEN), None),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], json!("관리자 권한이 필요합니다."));
}

#[tokio::test]
async fn drafts_stay_hidden_until_published() {
    let router = app();

    let (status, created) = send(
        &router,
        request(
            Method::POST,
            "/api/admin/posts",
            Some(ADMIN_TOKEN),
            Some(json!({
                "slug": "mediation-basics",
                "title": "조정이혼 기초",
                "content": "조정은 법원의 조정위원회가 양측의 합의를 돕는 절차입니다.",
                "category": "procedure",
                "tags": ["조정"]
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["data"]["id"].as_str().expect("post id").to_string();
    assert_eq!(created["data"]["published"], json!(false));

    let (status, _) = send(
        &router,
        request(Method::GET, "/api/blog/mediation-basics", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &router,
        request(
            Method::PUT,
            &format!("/api/admin/posts/{id}"),
            Some(ADMIN_TOKEN),
            Some(json!({ "published": true })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, listing) = send(&router, request(Method::GET, "/api/blog", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing["data"][0]["slug"], json!("mediation-basics"));
    assert_eq!(listing["data"][0]["categoryLabel"], json!("이혼절차"));

    let (status, overview) = send(
        &router,
        request(Method::GET, "/api/admin/overview", Some(ADMIN_TOKEN), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(overview["data"]["publishedPosts"], json!(1));
}

#[tokio::test]
async fn tickets_progress_until_closed() {
    let router = app();

    let (status, receipt) = send(
        &router,
        request(
            Method::POST,
            "/api/consultations",
            None,
            Some(json!({
                "name": "최유나",
                "phone": "010-5555-6666",
                "email": "yuna@example.kr",
                "consultationType": "property_division",
                "message": "재산분할 범위가 궁금합니다.",
                "privacyAgreed": true
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = receipt["data"]["id"].as_str().expect("ticket id").to_string();
    let uri = format!("/api/admin/consultations/{id}");

    for next in ["contacted", "in_progress", "completed"] {
        let (status, body) = send(
            &router,
            request(
                Method::PATCH,
                &uri,
                Some(ADMIN_TOKEN),
                Some(json!({ "status": next })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "moving to {next}");
        assert_eq!(body["data"]["status"], json!(next));
    }

    let (status, _) = send(
        &router,
        request(
            Method::PATCH,
            &uri,
            Some(ADMIN_TOKEN),
            Some(json!({ "status": "cancelled" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, completed) = send(
        &router,
        request(
            Method::GET,
            "/api/admin/consultations?status=completed",
            Some(ADMIN_TOKEN),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(completed["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(completed["data"][0]["phone"], json!("01055556666"));
}
