use std::{env, ops::RangeInclusive, str::FromStr};

use thiserror::Error;

const DEV_JWT_SECRET: &str = "DEV_JWT_SECRET";
/// Cost range bcrypt accepts.
const BCRYPT_COSTS: RangeInclusive<u32> = 4..=31;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
  #[error("Please define the MONGODB_URI environment variable")]
  MissingMongoUri,

  #[error("Invalid value for {0}")]
  InvalidValue(&'static str),
}

#[derive(Clone, Debug)]
pub struct Config {
  pub host: String,
  pub mongodb_uri: String,
  pub mongodb_database: String,
  pub jwt_secret: String,
  pub token_expiry_seconds: u64,
  pub bcrypt_cost: u32,
  pub hash_threads: u32,
}

impl Config {
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::from_lookup(|key| env::var(key).ok())
  }

  /// Builds the configuration from any key lookup, `from_env` passes the
  /// process environment.
  pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let mongodb_uri = lookup("MONGODB_URI")
      .filter(|uri| !uri.is_empty())
      .ok_or(ConfigError::MissingMongoUri)?;

    let jwt_secret = match lookup("JWT_SECRET").filter(|s| !s.is_empty()) {
      Some(secret) => secret,
      None => {
        tracing::warn!("JWT_SECRET is not set, using the development secret");
        DEV_JWT_SECRET.to_string()
      }
    };

    Ok(Self {
      host: lookup("HOST").unwrap_or_else(|| "0.0.0.0:3000".to_string()),
      mongodb_uri,
      mongodb_database: lookup("MONGODB_DATABASE")
        .unwrap_or_else(|| "staff_roster".to_string()),
      jwt_secret,
      token_expiry_seconds: parse_or(
        &lookup,
        "TOKEN_EXPIRY_SECONDS",
        60 * 60,
      )?,
      bcrypt_cost: parse_in_range(
        &lookup,
        "BCRYPT_COST",
        10,
        BCRYPT_COSTS,
      )?,
      // Zero threads would leave the hash channel without a receiver.
      hash_threads: parse_in_range(
        &lookup,
        "HASH_THREADS",
        4,
        1..=u32::MAX,
      )?,
    })
  }
}

fn parse_or<F, T>(
  lookup: &F,
  key: &'static str,
  default: T,
) -> Result<T, ConfigError>
where
  F: Fn(&str) -> Option<String>,
  T: FromStr,
{
  match lookup(key) {
    Some(value) => value
      .parse()
      .map_err(|_| ConfigError::InvalidValue(key)),
    None => Ok(default),
  }
}

fn parse_in_range<F>(
  lookup: &F,
  key: &'static str,
  default: u32,
  range: RangeInclusive<u32>,
) -> Result<u32, ConfigError>
where
  F: Fn(&str) -> Option<String>,
{
  let value = parse_or(lookup, key, default)?;
  if range.contains(&value) {
    Ok(value)
  } else {
    Err(ConfigError::InvalidValue(key))
  }
}
