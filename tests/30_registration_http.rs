mod common;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use student_manager_api::{
    auth::JwtKeys,
    registration::{MemoryStore, RegistrationKey},
    types::{CourseId, Role},
    AppState,
};
use tower::ServiceExt;

use common::{email_of, seed_students, subject, test_config, TEST_JWT_SECRET};

struct TestApp {
    router: Router,
    store: Arc<MemoryStore>,
    keys: JwtKeys,
}

impl TestApp {
    async fn new() -> Result<Self> {
        common::init_tracing();
        let config = test_config();
        let store = Arc::new(MemoryStore::new());
        store.insert_subject(subject(1, CourseId::K01, 2)).await;
        seed_students(&store, 1..=3).await;

        let state = AppState::in_memory(store.clone(), &config)?;
        Ok(Self {
            router: student_manager_api::app(state, &config),
            store,
            keys: JwtKeys::new(TEST_JWT_SECRET, 1)?,
        })
    }

    fn admin_token(&self) -> Result<String> {
        Ok(self.keys.issue("admin@example.com", Role::Admin)?)
    }

    fn student_token(&self, student_id: i64) -> Result<String> {
        Ok(self.keys.issue(&email_of(student_id), Role::Student)?)
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<String>,
    ) -> Result<(StatusCode, Value)> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };
        Ok((status, value))
    }

    async fn register(&self, token: &str, subject_id: i64, student_id: i64) -> Result<(StatusCode, Value)> {
        let body = json!({ "subjectID": subject_id, "studentID": student_id }).to_string();
        self.send(Method::POST, "/subjects/register", Some(token), Some(body)).await
    }

    async fn withdraw(&self, token: &str, subject_id: i64, student_id: i64) -> Result<(StatusCode, Value)> {
        let body = json!({ "subjectID": subject_id, "studentID": student_id }).to_string();
        self.send(Method::DELETE, "/subjects/register", Some(token), Some(body)).await
    }
}

#[tokio::test]
async fn health_and_root_are_public() -> Result<()> {
    let app = TestApp::new().await?;

    let (status, body) = app.send(Method::GET, "/health", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], "APP_SUCCESS");
    assert_eq!(body["data"]["database"], "memory");

    let (status, body) = app.send(Method::GET, "/", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["subjectLimitForCourse"], 5);
    Ok(())
}

#[tokio::test]
async fn registration_requires_a_bearer_token() -> Result<()> {
    let app = TestApp::new().await?;
    let body = json!({ "subjectID": 1, "studentID": 1 }).to_string();

    let (status, json) = app
        .send(Method::POST, "/subjects/register", None, Some(body.clone()))
        .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHENTICATED");

    let (status, _) = app
        .send(Method::POST, "/subjects/register", Some("not-a-jwt"), Some(body))
        .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn register_and_withdraw_over_http() -> Result<()> {
    let app = TestApp::new().await?;
    let admin = app.admin_token()?;

    let (status, body) = app.register(&admin, 1, 1).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "code": "APP_SUCCESS", "message": "Success", "data": true }));

    let (status, body) = app.register(&admin, 1, 2).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], true);

    let (status, body) = app.register(&admin, 1, 3).await?;
    assert_eq!(status, StatusCode::NOT_ACCEPTABLE);
    assert_eq!(body["code"], "REG_EXCEEDS_MAX_SUBJECTS");
    assert!(body["data"].is_null());

    let (status, body) = app.withdraw(&admin, 1, 1).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], true);

    let (status, body) = app.withdraw(&admin, 1, 1).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], false);

    let (status, _) = app.register(&admin, 1, 3).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.store.registration_count(1).await, 2);
    Ok(())
}

#[tokio::test]
async fn error_codes_map_to_statuses() -> Result<()> {
    let app = TestApp::new().await?;
    let student_one = app.student_token(1)?;

    // Someone else's registration
    let (status, body) = app.register(&student_one, 1, 2).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let (status, body) = app.register(&student_one, 1, 99).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "REG_STU_ID_INVALID");

    let (status, body) = app.register(&student_one, 42, 1).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "REG_SUB_ID_INVALID");

    assert_eq!(app.register(&student_one, 1, 1).await?.0, StatusCode::OK);
    let (status, body) = app.register(&student_one, 1, 1).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "STUDENT_ALREADY_REGISTERED");

    app.store.set_open_for_registration(1, false).await;
    let (status, body) = app.register(&app.student_token(2)?, 1, 2).await?;
    assert_eq!(status, StatusCode::NOT_ACCEPTABLE);
    assert_eq!(body["code"], "REG_COURSE_CLOSED");
    Ok(())
}

#[tokio::test]
async fn malformed_bodies_are_rejected_before_the_workflow() -> Result<()> {
    let app = TestApp::new().await?;
    let admin = app.admin_token()?;

    let cases = [
        (json!({ "studentID": 1 }), "REG_SUB_ID_NULL"),
        (json!({ "subjectID": 0, "studentID": 1 }), "REG_SUB_ID_NOT_POSITIVE"),
        (json!({ "subjectID": 1 }), "REG_STU_ID_NULL"),
        (json!({ "subjectID": 1, "studentID": -3 }), "REG_STU_ID_NOT_POSITIVE"),
    ];
    for (payload, code) in cases {
        let (status, body) = app
            .send(Method::POST, "/subjects/register", Some(&admin), Some(payload.to_string()))
            .await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", payload);
        assert_eq!(body["code"], code);
    }

    let (status, body) = app
        .send(Method::POST, "/subjects/register", Some(&admin), Some("{not json".to_string()))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_JSON");

    assert_eq!(app.store.registration_count(1).await, 0);
    Ok(())
}

#[tokio::test]
async fn subjects_are_created_by_admins_and_listed_per_student() -> Result<()> {
    let app = TestApp::new().await?;
    let admin = app.admin_token()?;
    let payload = json!({
        "subjectName": "Distributed Systems",
        "courseID": "K02",
        "numberOfStudent": 25,
        "numberOfCredit": 4,
        "tuition": 1200000
    })
    .to_string();

    let (status, body) = app
        .send(Method::POST, "/subjects", Some(&app.student_token(1)?), Some(payload.clone()))
        .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let (status, body) = app.send(Method::POST, "/subjects", Some(&admin), Some(payload)).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["courseID"], "K02");
    assert_eq!(body["data"]["isOpenForRegistration"], true);
    let new_id = body["data"]["subjectID"].as_i64().unwrap_or_default();
    assert!(new_id > 1);

    let bad = json!({
        "subjectName": "",
        "courseID": "K01",
        "numberOfStudent": 25,
        "numberOfCredit": 4
    })
    .to_string();
    let (status, body) = app.send(Method::POST, "/subjects", Some(&admin), Some(bad)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "SUB_NAME_IS_EMPTY");

    let (status, body) = app
        .send(Method::GET, &format!("/subjects/{}", new_id), Some(&admin), None)
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["subjectName"], "Distributed Systems");

    app.register(&admin, new_id, 1).await?;
    app.register(&admin, 1, 1).await?;
    let (status, body) = app
        .send(Method::GET, "/students/1/subjects", Some(&app.student_token(2)?), None)
        .await?;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body["data"]
        .as_array()
        .map(|subjects| subjects.iter().filter_map(|s| s["subjectID"].as_i64()).collect())
        .unwrap_or_default();
    assert_eq!(ids, vec![1, new_id]);
    assert!(app.store.registration(RegistrationKey::new(new_id, 1)).await.is_some());
    Ok(())
}

#[tokio::test]
async fn missing_subject_lookup_is_not_found() -> Result<()> {
    let app = TestApp::new().await?;
    let (status, body) = app
        .send(Method::GET, "/subjects/777", Some(&app.student_token(1)?), None)
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "REG_SUB_ID_INVALID");
    Ok(())
}

#[tokio::test]
async fn non_numeric_path_ids_use_the_error_envelope() -> Result<()> {
    let app = TestApp::new().await?;
    let token = app.admin_token()?;

    for uri in ["/subjects/abc", "/students/x1/subjects"] {
        let (status, body) = app.send(Method::GET, uri, Some(&token), None).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["code"], "INVALID_PATH_ID");
        assert!(body["data"].is_null());
    }
    Ok(())
}

#[tokio::test]
async fn admins_close_and_delete_subjects() -> Result<()> {
    let app = TestApp::new().await?;
    let admin = app.admin_token()?;
    let student_one = app.student_token(1)?;
    let close = json!({ "status": false }).to_string();

    let (status, body) = app
        .send(Method::PUT, "/subjects/1", Some(&student_one), Some(close.clone()))
        .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let (status, body) = app.send(Method::PUT, "/subjects/1", Some(&admin), Some(close)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["isOpenForRegistration"], false);
    assert_eq!(body["data"]["updatedBy"], "admin@example.com");

    let (status, body) = app.register(&student_one, 1, 1).await?;
    assert_eq!(status, StatusCode::NOT_ACCEPTABLE);
    assert_eq!(body["code"], "REG_COURSE_CLOSED");

    let open = json!({ "status": true }).to_string();
    assert_eq!(app.send(Method::PUT, "/subjects/1", Some(&admin), Some(open)).await?.0, StatusCode::OK);
    assert_eq!(app.register(&student_one, 1, 1).await?.0, StatusCode::OK);

    let (status, _) = app.send(Method::DELETE, "/subjects/1", Some(&student_one), None).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.send(Method::DELETE, "/subjects/1", Some(&admin), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], true);

    let (status, body) = app.send(Method::GET, "/subjects/1", Some(&student_one), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "REG_SUB_ID_INVALID");

    let (status, body) = app.send(Method::GET, "/subjects/1", Some(&admin), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["isDeleted"], true);

    let (status, body) = app.register(&app.student_token(2)?, 1, 2).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "REG_SUB_ID_INVALID");

    let (status, _) = app.send(Method::DELETE, "/subjects/1", Some(&admin), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}
