use axum::{
    body::Body,
    http::Request,
    response::Response,
};
use tower::ServiceExt; // for `oneshot`

use super::setup::TestApp;

impl TestApp {
    /// Sends a request through a clone of the router
    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn register_customer(
        &self,
        email: &str,
        full_name: &str,
        password: &str,
    ) -> Response {
        let body = format!(
            r#"{{"email": "{}", "full_name": "{}", "password": "{}"}}"#,
            email, full_name, password
        );
        let request = Request::builder()
            .method("POST")
            .uri("/customers/")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    pub async fn login(&self, username: &str, password: &str) -> Response {
        let body = format!(
            "username={}&password={}",
            username.replace('@', "%40"),
            password
        );
        let request = Request::builder()
            .method("POST")
            .uri("/token")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    /// Logs in and returns the bearer token, panicking on rejection
    pub async fn login_token(&self, username: &str, password: &str) -> String {
        let response = self.login(username, password).await;
        assert_eq!(response.status(), axum::http::StatusCode::OK);

        let token: serde_json::Value = super::assertions::read_json(response).await;
        token["access_token"].as_str().unwrap().to_string()
    }

    pub async fn create_product(
        &self,
        token: Option<&str>,
        name: &str,
        description: &str,
        price: f64,
    ) -> Response {
        let body = format!(
            r#"{{"name": "{}", "description": "{}", "price": {}}}"#,
            name, description, price
        );
        let mut builder = Request::builder()
            .method("POST")
            .uri("/products/")
            .header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        self.send(builder.body(Body::from(body)).unwrap()).await
    }

    pub async fn create_order(
        &self,
        token: Option<&str>,
        customer_id: i32,
        total_amount: f64,
        product_ids: &[i32],
    ) -> Response {
        let body = format!(
            r#"{{"customer_id": {}, "total_amount": {}, "product_ids": {:?}}}"#,
            customer_id, total_amount, product_ids
        );
        let mut builder = Request::builder()
            .method("POST")
            .uri("/orders/")
            .header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        self.send(builder.body(Body::from(body)).unwrap()).await
    }

    pub async fn get_customer(&self, token: Option<&str>, customer_id: i32) -> Response {
        let mut builder = Request::builder()
            .method("GET")
            .uri(format!("/customers/{}", customer_id));
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }
}
