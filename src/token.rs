use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name of the HTTP-only cookie carrying the identity token.
pub const TOKEN_COOKIE: &str = "token";

/// Signed identity claims. The caller-supplied payload is carried opaquely
/// alongside the registered expiry and issued-at claims.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub exp: i64,
    pub iat: i64,
    #[serde(flatten)]
    pub identity: Map<String, Value>,
}

#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_hours: i64,
}

impl TokenService {
    pub fn new(secret: &str, expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry_hours,
        }
    }

    /// Signs the claimed identity with the configured validity window.
    pub fn issue(&self, mut identity: Map<String, Value>) -> Result<String, jsonwebtoken::errors::Error> {
        // Registered claims always come from the service.
        identity.remove("exp");
        identity.remove("iat");

        let now = Utc::now();
        let claims = Claims {
            exp: (now + Duration::hours(self.expiry_hours)).timestamp(),
            iat: now.timestamp(),
            identity,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
    }

    /// Checks signature and expiry, returning the decoded claims.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default()).map(|data| data.claims)
    }
}
