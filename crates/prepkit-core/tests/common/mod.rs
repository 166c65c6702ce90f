//! Shared fixtures for pipeline integration tests.

use serde_json::{json, Value};
use std::path::{Path, PathBuf};

/// A small browser capture: one HTML page, one stylesheet, one PNG, one API call
/// carrying a bearer token in a header and in the response body.
pub fn capture() -> Value {
    json!({
        "log": {
            "version": "1.2",
            "creator": { "name": "WebInspector", "version": "537.36" },
            "browser": { "name": "Chrome", "version": "126" },
            "pages": [{ "id": "page_1", "title": "Dashboard" }],
            "entries": [
                {
                    "pageref": "page_1",
                    "time": 41.2,
                    "request": { "method": "GET", "url": "https://app.example.com/", "headers": [] },
                    "response": {
                        "status": 200,
                        "headers": [{ "name": "Content-Type", "value": "text/html" }],
                        "content": { "size": 25, "mimeType": "text/html", "text": "<html>dashboard</html>" }
                    },
                    "timings": { "wait": 30.1 },
                    "cache": {}
                },
                {
                    "request": { "method": "GET", "url": "https://cdn.example.com/site.css?v=3", "headers": [] },
                    "response": {
                        "status": 200,
                        "headers": [],
                        "content": { "size": 18, "mimeType": "text/css", "text": "body { margin: 0 }" }
                    }
                },
                {
                    "request": { "method": "GET", "url": "https://cdn.example.com/logo.png", "headers": [] },
                    "response": {
                        "status": 200,
                        "headers": [],
                        "content": { "size": 4, "mimeType": "image/png", "encoding": "base64", "text": "iVBORw0KGgo=" }
                    }
                },
                {
                    "request": {
                        "method": "GET",
                        "url": "https://api.example.com/v1/me",
                        "headers": [{ "name": "Authorization", "value": "Bearer sk-live-123" }]
                    },
                    "response": {
                        "status": 200,
                        "headers": [{ "name": "Content-Type", "value": "application/json" }],
                        "content": { "size": 40, "mimeType": "application/json", "text": "{\"user\":\"ada\",\"token\":\"sk-live-123\"}" }
                    }
                }
            ]
        }
    })
}

/// Writes `value` pretty-printed to `dir/name` and returns the path.
pub fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_vec_pretty(value).unwrap()).unwrap();
    path
}

pub fn read_json(path: &Path) -> Value {
    serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap()
}
