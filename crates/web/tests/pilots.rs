mod common;

use axum::http::{Method, StatusCode, header};
use common::{SERVICE_KEY, TestApp, body_json, names};
use serde_json::{Value, json};
use sqlx::PgPool;

async fn pilot_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM pilots")
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "../storage/migrations")]
async fn create_without_token_persists_nothing(pool: PgPool) {
    let app = TestApp::new(pool.clone());
    let body = json!({"name": "Gaston", "gender": "M", "races_count": 5});

    let response = app
        .request(Method::POST, "/pilots/", Some(body.clone()), None)
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Token"
    );
    assert_eq!(
        body_json(response).await["error"],
        "Authentication credentials were not provided."
    );

    let response = app
        .request(Method::POST, "/pilots/", Some(body), Some("Token not-a-key"))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Invalid token.");

    assert_eq!(pilot_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../storage/migrations")]
async fn create_and_fetch_with_token(pool: PgPool) {
    let app = TestApp::new(pool);
    let authorization = format!("Token {}", app.token().await);

    let response = app
        .request(
            Method::POST,
            "/pilots/",
            Some(json!({"name": "Gaston", "gender": "M", "races_count": 5})),
            Some(&authorization),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let url = created["url"].as_str().unwrap().to_string();

    let response = app
        .request(Method::GET, &url, None, Some(&authorization))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let fetched = body_json(response).await;
    assert_eq!(fetched["name"], "Gaston");
    assert_eq!(fetched["gender"], "M");
    assert_eq!(fetched["gender_description"], "Male");
    assert_eq!(fetched["races_count"], 5);
    assert_eq!(fetched["competitions_count"], 0);

    let response = app.get(&url).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../storage/migrations")]
async fn token_keyword_variants(pool: PgPool) {
    let app = TestApp::new(pool);
    let key = app.token().await;

    for authorization in [
        format!("Token {key}"),
        format!("TOKEN {key}"),
        format!("token {key}"),
        format!("Bearer {key}"),
    ] {
        let response = app
            .request(Method::GET, "/pilots/", None, Some(&authorization))
            .await;
        assert_eq!(response.status(), StatusCode::OK, "{authorization}");
    }

    let cases = [
        ("Token", "Invalid token header. No credentials provided."),
        (
            "Token abc def",
            "Invalid token header. Token string should not contain spaces.",
        ),
        ("Basic dXNlcjpwYXNz", "Authentication credentials were not provided."),
    ];
    for (authorization, message) in cases {
        let response = app
            .request(Method::GET, "/pilots/", None, Some(authorization))
            .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{authorization}");
        assert_eq!(body_json(response).await["error"], message);
    }
}

#[sqlx::test(migrations = "../storage/migrations")]
async fn service_key_is_accepted(pool: PgPool) {
    let app = TestApp::new(pool);

    let response = app
        .request(
            Method::GET,
            "/pilots/",
            None,
            Some(&format!("Token {SERVICE_KEY}")),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../storage/migrations")]
async fn invalid_gender_and_negative_races_are_rejected(pool: PgPool) {
    let app = TestApp::new(pool.clone());
    let authorization = format!("Token {SERVICE_KEY}");

    let response = app
        .request(
            Method::POST,
            "/pilots/",
            Some(json!({"name": "Gaston", "gender": "X"})),
            Some(&authorization),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["details"]["gender"],
        json!(["\"X\" is not a valid choice."])
    );

    let response = app
        .request(
            Method::POST,
            "/pilots/",
            Some(json!({"name": "Gaston", "races_count": -1})),
            Some(&authorization),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(pilot_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../storage/migrations")]
async fn defaults_and_partial_update(pool: PgPool) {
    let app = TestApp::new(pool);
    let authorization = format!("Token {SERVICE_KEY}");

    let created = app.create_pilot(json!({"name": "Penelope"})).await;
    assert_eq!(created["gender"], "M");
    assert_eq!(created["races_count"], 0);
    let url = created["url"].as_str().unwrap().to_string();

    let response = app
        .request(
            Method::PATCH,
            &url,
            Some(json!({"gender": "F"})),
            Some(&authorization),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let updated = body_json(response).await;
    assert_eq!(updated["name"], "Penelope");
    assert_eq!(updated["gender"], "F");
    assert_eq!(updated["gender_description"], "Female");
    assert_eq!(updated["inserted_timestamp"], created["inserted_timestamp"]);
}

async fn list(app: &TestApp, uri: &str) -> Value {
    let response = app
        .request(Method::GET, uri, None, Some(&format!("Token {SERVICE_KEY}")))
        .await;
    assert_eq!(response.status(), StatusCode::OK, "{uri}");
    body_json(response).await
}

#[sqlx::test(migrations = "../storage/migrations")]
async fn filters_and_ordering(pool: PgPool) {
    let app = TestApp::new(pool);

    app.create_pilot(json!({"name": "Gaston", "gender": "M", "races_count": 5}))
        .await;
    app.create_pilot(json!({"name": "Penelope", "gender": "F", "races_count": 12}))
        .await;
    app.create_pilot(json!({"name": "Peter", "gender": "M", "races_count": 12}))
        .await;

    let page = list(&app, "/pilots/?gender=F").await;
    assert_eq!(names(&page), vec!["Penelope"]);

    let page = list(&app, "/pilots/?races_count=12").await;
    assert_eq!(names(&page), vec!["Penelope", "Peter"]);

    let page = list(&app, "/pilots/?search=pe").await;
    assert_eq!(names(&page), vec!["Penelope", "Peter"]);

    let page = list(&app, "/pilots/?ordering=-races_count,-name").await;
    assert_eq!(names(&page), vec!["Peter", "Penelope", "Gaston"]);
}

#[sqlx::test(migrations = "../storage/migrations")]
async fn delete_requires_token(pool: PgPool) {
    let app = TestApp::new(pool.clone());
    let created = app.create_pilot(json!({"name": "Gaston"})).await;
    let url = created["url"].as_str().unwrap().to_string();

    assert_eq!(app.delete(&url).await.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(pilot_count(&pool).await, 1);

    let response = app
        .request(
            Method::DELETE,
            &url,
            None,
            Some(&format!("Token {SERVICE_KEY}")),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(pilot_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../storage/migrations")]
async fn unknown_pilot_is_not_found(pool: PgPool) {
    let app = TestApp::new(pool);

    let response = app
        .request(
            Method::GET,
            "/pilots/999/",
            None,
            Some(&format!("Token {SERVICE_KEY}")),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
