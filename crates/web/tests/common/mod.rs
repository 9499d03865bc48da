#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
    response::Response,
};
use drones_storage::{Database, repository::auth_token::AuthTokenRepository};
use drones_web::middleware::auth::ApiKeys;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

pub const SERVICE_KEY: &str = "service-key-for-tests";

pub struct TestApp {
    pub router: Router,
    pub pool: PgPool,
}

impl TestApp {
    pub fn new(pool: PgPool) -> Self {
        let router = drones_web::app(
            Database::from_pool(pool.clone()),
            ApiKeys::from_comma_separated(SERVICE_KEY),
        );
        Self { router, pool }
    }

    /// Issues a database token for a throwaway user.
    pub async fn token(&self) -> String {
        AuthTokenRepository::new(&self.pool)
            .issue("test")
            .await
            .unwrap()
            .key
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        authorization: Option<&str>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.request(Method::GET, uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> Response {
        self.request(Method::POST, uri, Some(body), None).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> Response {
        self.request(Method::PATCH, uri, Some(body), None).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> Response {
        self.request(Method::PUT, uri, Some(body), None).await
    }

    pub async fn delete(&self, uri: &str) -> Response {
        self.request(Method::DELETE, uri, None, None).await
    }

    /// Creates a resource and returns its representation, asserting on 201.
    pub async fn create(&self, uri: &str, body: Value) -> Value {
        let response = self.post(uri, body).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await
    }

    /// Creates a pilot with the service key.
    pub async fn create_pilot(&self, body: Value) -> Value {
        let response = self
            .request(
                Method::POST,
                "/pilots/",
                Some(body),
                Some(&format!("Token {SERVICE_KEY}")),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await
    }
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn names(page: &Value) -> Vec<&str> {
    page["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap())
        .collect()
}
