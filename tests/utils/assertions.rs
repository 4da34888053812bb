use axum::response::Response;
use serde::de::DeserializeOwned;

pub async fn read_body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn read_json<T: DeserializeOwned>(response: Response) -> T {
    let body = read_body_string(response).await;
    serde_json::from_str(&body).unwrap()
}

/// Extracts the message from an `{"error": "..."}` body
pub async fn read_error_message(response: Response) -> String {
    let body: serde_json::Value = read_json(response).await;
    body["error"].as_str().unwrap().to_string()
}
