use crate::error::{AppError, AppResult};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub username: String,
    pub exp: i64,
    pub iat: i64,
    pub token_type: TokenType,
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expires_in: i64,
    refresh_token_expires_in: i64,
}

impl JwtService {
    pub fn new(secret: &str, access_expires_in: i64, refresh_expires_in: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expires_in: access_expires_in,
            refresh_token_expires_in: refresh_expires_in,
        }
    }

    fn generate_token(&self, user_id: i64, username: &str, token_type: TokenType) -> AppResult<String> {
        let expires_in = match token_type {
            TokenType::Access => self.access_token_expires_in,
            TokenType::Refresh => self.refresh_token_expires_in,
        };
        let now = Utc::now();

        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            exp: (now + Duration::seconds(expires_in)).timestamp(),
            iat: now.timestamp(),
            token_type,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(AppError::JwtError)
    }

    pub fn generate_access_token(&self, user_id: i64, username: &str) -> AppResult<String> {
        self.generate_token(user_id, username, TokenType::Access)
    }

    pub fn generate_refresh_token(&self, user_id: i64, username: &str) -> AppResult<String> {
        self.generate_token(user_id, username, TokenType::Refresh)
    }

    pub fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(AppError::JwtError)
    }

    /// 校验签名、有效期和令牌类型
    fn verify_kind(&self, token: &str, expected: TokenType) -> AppResult<Claims> {
        let claims = self.verify_token(token)?;
        if claims.token_type != expected {
            return Err(AppError::auth_required());
        }
        Ok(claims)
    }

    pub fn verify_access_token(&self, token: &str) -> AppResult<Claims> {
        self.verify_kind(token, TokenType::Access)
    }

    pub fn verify_refresh_token(&self, token: &str) -> AppResult<Claims> {
        self.verify_kind(token, TokenType::Refresh)
    }

    pub fn get_access_token_expires_in(&self) -> i64 {
        self.access_token_expires_in
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_roundtrip() {
        let jwt = JwtService::new("secret", 60, 120);
        let token = jwt.generate_access_token(42, "luna").unwrap();
        let claims = jwt.verify_access_token(&token).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.username, "luna");
        assert_eq!(claims.token_type, TokenType::Access);
        assert_eq!(claims.exp - claims.iat, 60);
    }

    #[test]
    fn test_token_types_are_not_interchangeable() {
        let jwt = JwtService::new("secret", 60, 120);
        let refresh = jwt.generate_refresh_token(1, "luna").unwrap();
        assert!(jwt.verify_access_token(&refresh).is_err());
        let access = jwt.generate_access_token(1, "luna").unwrap();
        assert!(jwt.verify_refresh_token(&access).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let a = JwtService::new("secret-a", 60, 120);
        let b = JwtService::new("secret-b", 60, 120);
        let token = a.generate_access_token(1, "luna").unwrap();
        assert!(b.verify_access_token(&token).is_err());
    }
}
