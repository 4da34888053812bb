use serde::{Deserialize, Serialize};

/// JWT claims carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    pub sub: String, // Customer email (standard JWT subject claim)
    pub exp: usize,  // Expiration timestamp (standard JWT claim)
}

/// Form body accepted by the token endpoint
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response structure for the token endpoint
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_serialization() {
        let claims = Claims {
            sub: "a@x.com".to_string(),
            exp: 1234567890,
        };

        let json = serde_json::to_string(&claims).unwrap();
        assert!(json.contains("a@x.com"));

        let deserialized: Claims = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, claims);
    }

    #[test]
    fn test_token_response_serialization() {
        let response = TokenResponse {
            access_token: "jwt-token-here".to_string(),
            token_type: "bearer".to_string(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("jwt-token-here"));
        assert!(json.contains("\"token_type\":\"bearer\""));
    }
}
