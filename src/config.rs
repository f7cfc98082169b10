use std::env;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use thiserror::Error;

use crate::domain::checkout::DeliveryTariffs;
use crate::domain::pricing::{round_money, MONEY_SCALE};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub pool_size: u32,
    pub tariffs: DeliveryTariffs,
}

impl AppConfig {
    /// Read the configuration from the process environment. Call
    /// `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or(&lookup, "PORT", 8080)?;
        let pool_size = parse_or(&lookup, "DATABASE_POOL_SIZE", 10)?;
        if pool_size == 0 {
            return Err(ConfigError::Invalid {
                name: "DATABASE_POOL_SIZE",
                value: "0".to_string(),
            });
        }

        let tariffs = DeliveryTariffs {
            post_office: price_or(&lookup, "DELIVERY_PRICE_POST_OFFICE", "50.00")?,
            courier: price_or(&lookup, "DELIVERY_PRICE_COURIER", "100.00")?,
            self_pick_up: price_or(&lookup, "DELIVERY_PRICE_SELF_PICK_UP", "0.00")?,
        };

        Ok(Self {
            database_url,
            host,
            port,
            pool_size,
            tariffs,
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

fn price_or<F>(lookup: &F, name: &'static str, default: &str) -> Result<BigDecimal, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(name).unwrap_or_else(|| default.to_string());
    // Prices are stored as NUMERIC(12, 2): whole cents only.
    match BigDecimal::from_str(&value) {
        Ok(price) if price >= BigDecimal::from(0) && price == round_money(&price) => {
            Ok(price.with_scale(MONEY_SCALE))
        }
        _ => Err(ConfigError::Invalid { name, value }),
    }
}
