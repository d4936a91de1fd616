#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Method, Request},
    response::Response,
    Router,
};
use chrono::{TimeZone, Utc};
use parts_inventory::{
    app_router,
    config::AppConfig,
    db::{self, DbConfig},
    models::Part,
    repositories::{DatabasePartRepository, InMemoryPartRepository, PartRepository},
    AppState,
};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Helper harness wrapping the full router over a fresh repository.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Application backed by the in-memory repository.
    pub async fn new() -> Self {
        Self::with_repository(Arc::new(InMemoryPartRepository::new()))
    }

    /// Application backed by a migrated in-memory SQLite database.
    pub async fn with_database() -> Self {
        let pool = db::establish_connection_with_config(&DbConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            ..Default::default()
        })
        .await
        .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        Self::with_repository(Arc::new(DatabasePartRepository::new(Arc::new(pool))))
    }

    pub fn with_repository(parts: Arc<dyn PartRepository>) -> Self {
        let cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        let state = AppState::new(cfg, parts);
        let router = app_router(state.clone());
        Self { router, state }
    }

    pub fn parts(&self) -> &dyn PartRepository {
        self.state.parts.as_ref()
    }

    /// Stores a fully populated part and returns it.
    pub async fn seed_part(&self, reference: &str) -> Part {
        let mut part = self.parts().create().await.expect("allocate part");
        part.reference = reference.to_string();
        part.weight = 12.5;
        part.quantity = 8;
        part.location = "Warehouse 2".to_string();
        part.supplier = "Aceros del Sur".to_string();
        part.dimensions = "100x50x20".to_string();
        part.status = "recibido".to_string();
        part.arrival_date = Utc
            .with_ymd_and_hms(2024, 3, 15, 10, 30, 0)
            .single()
            .expect("valid date");
        self.parts().store(&part).await.expect("store part");
        part
    }

    /// Send a request against the router.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.request(Method::GET, uri, None, &[]).await
    }

    /// Invokes a named action through `POST /guiapi`.
    pub async fn action(&self, name: &str, args: Value) -> Response {
        self.request(
            Method::POST,
            "/guiapi",
            Some(json!({ "name": name, "args": args })),
            &[],
        )
        .await
    }
}

pub async fn response_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    serde_json::from_slice(&bytes).expect("json response")
}

pub async fn response_text(response: Response) -> String {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    String::from_utf8(bytes.to_vec()).expect("utf-8 response")
}

/// Markup of a container-replace action response.
pub fn replaced_content(body: &Value) -> &str {
    assert_eq!(body["html"][0]["operation"], "replace");
    assert_eq!(body["html"][0]["selector"], "#container");
    body["html"][0]["content"]
        .as_str()
        .expect("replace content is a string")
}

/// Name/value pairs of every `<input>` in `markup`, with entities decoded
/// the way a browser does before `sendForm` reads the values.
pub fn submitted_fields(markup: &str) -> Value {
    fn attr<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
        let start = tag.find(&format!(" {}=\"", name))? + name.len() + 3;
        let len = tag[start..].find('"')?;
        Some(&tag[start..start + len])
    }
    fn unescape(raw: &str) -> String {
        raw.replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#x27;", "'")
            .replace("&#x2F;", "/")
            .replace("&amp;", "&")
    }

    let mut fields = serde_json::Map::new();
    for tag in markup.split("<input").skip(1) {
        let tag = &tag[..tag.find('>').unwrap_or(tag.len())];
        if let (Some(name), Some(value)) = (attr(tag, "name"), attr(tag, "value")) {
            fields.insert(name.to_string(), json!(unescape(value)));
        }
    }
    Value::Object(fields)
}
