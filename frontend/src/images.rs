//! Venue photo lookup through the Google Custom Search image API. Without a
//! configured key the lookup is skipped and the details panel simply shows
//! no photos.

use seed::prelude::*;
use serde_json::Value;

const SEARCH_ENGINE_ID: &str = "f1e4f4ac2f0a44dc4";
const MAX_IMAGES: usize = 5;

fn api_key() -> Option<&'static str> {
    option_env!("FRONTEND_IMAGE_SEARCH_KEY")
}

pub async fn fetch_images(query: String) -> Vec<String> {
    let Some(key) = api_key() else {
        return Vec::new();
    };
    let url = format!(
        "https://customsearch.googleapis.com/customsearch/v1?key={key}&cx={SEARCH_ENGINE_ID}&searchType=image&q={}",
        encode_query(&query),
    );
    let raw = match Request::new(url).fetch().await {
        Ok(raw) => raw,
        Err(err) => {
            crate::debug_log(&format!("image search failed: {err:?}"));
            return Vec::new();
        }
    };
    let resp = match raw.check_status() {
        Ok(resp) => resp,
        Err(status_err) => {
            crate::debug_log(&format!("image search rejected: {status_err:?}"));
            return Vec::new();
        }
    };
    match resp.json::<Value>().await {
        Ok(value) => extract_image_links(&value),
        Err(err) => {
            crate::debug_log(&format!("image search undecodable: {err:?}"));
            Vec::new()
        }
    }
}

/// Collect usable image links from a search response: drop Instagram hosts
/// (they refuse hotlinking) and keep at most [`MAX_IMAGES`].
pub fn extract_image_links(value: &Value) -> Vec<String> {
    let Some(items) = value.get("items").and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| item.get("link").and_then(Value::as_str))
        .filter(|link| !link.contains("instagram.com"))
        .map(str::to_string)
        .take(MAX_IMAGES)
        .collect()
}

fn encode_query(query: &str) -> String {
    let mut out = String::with_capacity(query.len());
    for c in query.chars() {
        match c {
            ' ' => out.push('+'),
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' | '~' => out.push(c),
            other => {
                let mut buf = [0u8; 4];
                for byte in other.encode_utf8(&mut buf).as_bytes() {
                    out.push_str(&format!("%{byte:02X}"));
                }
            }
        }
    }
    out
}
