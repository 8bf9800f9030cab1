//! Card JSON fixtures and mock collection endpoint helpers

use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path of the collection endpoint on the mock server
pub const COLLECTION_PATH: &str = "/cards/collection";

/// Bytes served for every image
pub const IMAGE_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake image";

/// Single-faced card object with `png` and `normal` images hosted on `server`
pub fn card_json(server: &MockServer, name: &str, set: &str, number: &str) -> Value {
    let slug = name.to_lowercase().replace(' ', "-");
    json!({
        "object": "card",
        "name": name,
        "set": set,
        "collector_number": number,
        "image_uris": {
            "png": format!("{}/png/{slug}.png?1562", server.uri()),
            "normal": format!("{}/normal/{slug}.jpg?1562", server.uri()),
        }
    })
}

/// Two-faced card object with `normal` images on each face
pub fn double_faced_json(
    server: &MockServer,
    front: &str,
    back: &str,
    set: &str,
    number: &str,
) -> Value {
    let face = |name: &str| {
        json!({
            "name": name,
            "image_uris": {
                "normal": format!("{}/normal/{}.jpg", server.uri(), name.to_lowercase()),
            }
        })
    };
    json!({
        "object": "card",
        "name": format!("{front} // {back}"),
        "set": set,
        "collector_number": number,
        "card_faces": [face(front), face(back)],
    })
}

/// Collection response body
pub fn collection_json(data: Vec<Value>, not_found: Vec<Value>) -> Value {
    json!({
        "object": "list",
        "not_found": not_found,
        "data": data,
    })
}

/// Respond to one exact batch of identifiers with the given body
pub async fn mount_batch(server: &MockServer, identifiers: Value, response: Value) {
    Mock::given(method("POST"))
        .and(path(COLLECTION_PATH))
        .and(body_json(json!({ "identifiers": identifiers })))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .expect(1)
        .mount(server)
        .await;
}

/// Serve [`IMAGE_BYTES`] for every GET request
pub async fn mount_images(server: &MockServer) {
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(IMAGE_BYTES.to_vec()))
        .mount(server)
        .await;
}
