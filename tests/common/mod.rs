//! Shared test doubles and request builders.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use serde_json::Value;

use fashion_tryon_proxy::api::AppState;
use fashion_tryon_proxy::catalog::{FetchedImage, ImageSource};
use fashion_tryon_proxy::replicate::InferenceProvider;
use fashion_tryon_proxy::{AppError, AppResult, Config, StockModelCatalog, TryOnService};

pub const BOUNDARY: &str = "tryon-test-boundary";

/// Provider that records every call and answers with a canned output.
pub struct SpyProvider {
    calls: AtomicUsize,
    output: Result<Value, String>,
    last_inputs: Mutex<Option<(String, Value)>>,
    watch_dir: Option<PathBuf>,
    staged_during_call: AtomicUsize,
}

impl SpyProvider {
    pub fn returning(output: Value) -> Self {
        SpyProvider {
            calls: AtomicUsize::new(0),
            output: Ok(output),
            last_inputs: Mutex::new(None),
            watch_dir: None,
            staged_during_call: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        SpyProvider { output: Err(message.to_string()), ..Self::returning(Value::Null) }
    }

    /// Count the files in `dir` at the moment `infer` is called.
    pub fn watching(mut self, dir: &Path) -> Self {
        self.watch_dir = Some(dir.to_path_buf());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn staged_during_call(&self) -> usize {
        self.staged_during_call.load(Ordering::SeqCst)
    }

    pub fn last_inputs(&self) -> Option<(String, Value)> {
        self.last_inputs.lock().unwrap().clone()
    }
}

#[async_trait]
impl InferenceProvider for SpyProvider {
    async fn infer(&self, model_id: &str, inputs: Value) -> AppResult<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(dir) = &self.watch_dir {
            self.staged_during_call.store(count_files(dir), Ordering::SeqCst);
        }
        *self.last_inputs.lock().unwrap() = Some((model_id.to_string(), inputs));
        self.output.clone().map_err(AppError::Provider)
    }
}

/// Image source serving fixed bytes, or failing every fetch.
pub struct StubImages {
    calls: AtomicUsize,
    fail: bool,
    requested: Mutex<Vec<String>>,
}

impl StubImages {
    pub fn ok() -> Self {
        StubImages { calls: AtomicUsize::new(0), fail: false, requested: Mutex::new(Vec::new()) }
    }

    pub fn failing() -> Self {
        StubImages { fail: true, ..Self::ok() }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageSource for StubImages {
    async fn fetch(&self, url: &str) -> AppResult<FetchedImage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(url.to_string());
        if self.fail {
            return Err(AppError::UpstreamFetch(format!("{} returned 404 Not Found", url)));
        }
        Ok(FetchedImage {
            bytes: b"stock-model-photo".to_vec(),
            content_type: Some("image/png".to_string()),
        })
    }
}

pub fn test_config(token: Option<&str>, staging_dir: &Path) -> Config {
    Config {
        replicate_api_token: token.map(str::to_string),
        staging_dir: staging_dir.to_path_buf(),
        ..Config::default()
    }
}

pub fn app_state(
    token: Option<&str>,
    staging_dir: &Path,
    provider: Arc<SpyProvider>,
    images: Arc<StubImages>,
) -> Arc<AppState> {
    app_state_with_config(test_config(token, staging_dir), provider, images)
}

pub fn app_state_with_config(
    config: Config,
    provider: Arc<SpyProvider>,
    images: Arc<StubImages>,
) -> Arc<AppState> {
    let service = TryOnService::new(
        &config,
        Arc::new(StockModelCatalog::built_in()),
        provider,
        images,
    );
    Arc::new(AppState { config, service })
}

pub fn count_files(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}

/// Hand-assembled `multipart/form-data` body.
pub fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    if let Some((name, content_type, bytes)) = file {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"garment.jpg\"\r\n",
                name
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_request(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn json_body(response: Response<axum::body::BoxBody>) -> Value {
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Stand-in for an uploaded photo: a JPEG SOI marker followed by filler.
pub fn fake_jpeg(len: usize) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0];
    bytes.resize(len, 0x42);
    bytes
}
