//! Read-only accessors for the HAR 1.2 entry fields the tools care about.
//!
//! Missing or mistyped fields read as empty strings; browsers disagree on
//! which optional members they emit.

use serde_json::Value;

/// `request.url`, or `""`.
pub fn request_url(entry: &Value) -> &str {
    entry
        .pointer("/request/url")
        .and_then(Value::as_str)
        .unwrap_or("")
}

/// Response content type: `response.content.mimeType`, falling back to the
/// `Content-Type` response header.
pub fn mime_type(entry: &Value) -> &str {
    let from_content = entry
        .pointer("/response/content/mimeType")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty());
    from_content
        .or_else(|| {
            entry
                .pointer("/response/headers")
                .and_then(|h| get_header(h, "Content-Type"))
        })
        .unwrap_or("")
}

/// `response.content.encoding`, or `""`.
pub fn content_encoding(entry: &Value) -> &str {
    entry
        .pointer("/response/content/encoding")
        .and_then(Value::as_str)
        .unwrap_or("")
}

/// Case-insensitive lookup in a HAR `[{name, value}, ...]` header list.
pub fn get_header<'a>(headers: &'a Value, name: &str) -> Option<&'a str> {
    headers.as_array()?.iter().find_map(|h| {
        let header_name = h.get("name")?.as_str()?;
        if header_name.eq_ignore_ascii_case(name) {
            h.get("value")?.as_str()
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn mime_type_prefers_content() {
        let entry = json!({
            "response": {
                "headers": [{ "name": "Content-Type", "value": "text/plain" }],
                "content": { "mimeType": "image/png" }
            }
        });
        assert_eq!(mime_type(&entry), "image/png");
    }

    #[test]
    fn mime_type_falls_back_to_header() {
        let entry = json!({
            "response": {
                "headers": [{ "name": "content-type", "value": "font/woff2" }],
                "content": { "mimeType": "" }
            }
        });
        assert_eq!(mime_type(&entry), "font/woff2");
    }

    #[test]
    fn missing_fields_read_empty() {
        let entry = json!({ "request": {} });
        assert_eq!(request_url(&entry), "");
        assert_eq!(mime_type(&entry), "");
        assert_eq!(content_encoding(&entry), "");
    }

    #[test]
    fn get_header_case_insensitive() {
        let headers = json!([
            { "name": "Cookie", "value": "session=abc123" },
            { "name": "Accept", "value": "*/*" }
        ]);
        assert_eq!(get_header(&headers, "cookie"), Some("session=abc123"));
        assert_eq!(get_header(&headers, "Authorization"), None);
    }
}
