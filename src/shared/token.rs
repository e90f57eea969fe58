use chrono::Utc;
use jsonwebtoken::{
  decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
  #[error("Token error: {0}")]
  Jwt(#[from] jsonwebtoken::errors::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
  #[serde(rename = "userId")]
  pub user_id: String,
  pub email: String,
  pub iat: u64,
  pub exp: u64,
}

/// Signs and verifies session tokens. Tokens are never stored, a token stays
/// valid until `exp` whatever happens to the user afterwards.
#[derive(Clone)]
pub struct TokenService {
  encoding_key: EncodingKey,
  decoding_key: DecodingKey,
  expiry_seconds: u64,
}

impl TokenService {
  pub fn new(secret: &str, expiry_seconds: u64) -> Self {
    Self {
      encoding_key: EncodingKey::from_secret(secret.as_bytes()),
      decoding_key: DecodingKey::from_secret(secret.as_bytes()),
      expiry_seconds,
    }
  }

  pub fn issue(
    &self,
    user_id: &str,
    email: &str,
  ) -> Result<String, TokenError> {
    let now = Utc::now().timestamp() as u64;
    self.sign(&SessionClaims {
      user_id: user_id.to_string(),
      email: email.to_string(),
      iat: now,
      exp: now + self.expiry_seconds,
    })
  }

  pub fn sign(&self, claims: &SessionClaims) -> Result<String, TokenError> {
    Ok(encode(
      &Header::new(Algorithm::HS256),
      claims,
      &self.encoding_key,
    )?)
  }

  pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    let token_data =
      decode::<SessionClaims>(token, &self.decoding_key, &validation)?;
    Ok(token_data.claims)
  }
}
