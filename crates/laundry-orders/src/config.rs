//! Service configuration
//!
//! Every knob has a default; environment variables override them. The binary loads a `.env`
//! file first (see `main.rs`), so the same variables can live there.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `LAUNDRY_STATS_TTL_SECS` | `60` | statistics snapshot lifetime |
//! | `LAUNDRY_UTC_OFFSET_MINUTES` | `330` | business timezone (+05:30) |
//! | `LAUNDRY_RECEIPT_WIDTH` | `4` | zero-padded receipt display width |
//! | `LAUNDRY_RECEIPT_SEED` | `1` | first receipt number on an empty counter |
//! | `LAUNDRY_STORE_BUFFER` | `32` | request queue length of each store actor |
//! | `LAUNDRY_UPDATE_RETRIES` | `3` | re-reads after a revision conflict |

use chrono::{FixedOffset, Offset, TimeDelta, Utc};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var}={value:?} is not valid: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime settings for [`EntrySystem`](crate::runtime::EntrySystem).
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub stats_ttl: TimeDelta,
    pub business_offset: FixedOffset,
    pub receipt_width: usize,
    pub receipt_seed: u64,
    pub store_buffer: usize,
    pub update_retries: u32,
}

pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 5 * 60 + 30;

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            stats_ttl: TimeDelta::seconds(60),
            business_offset: offset_from_minutes(DEFAULT_UTC_OFFSET_MINUTES)
                .unwrap_or_else(|| Utc.fix()),
            receipt_width: 4,
            receipt_seed: 1,
            store_buffer: 32,
            update_retries: 3,
        }
    }
}

fn offset_from_minutes(minutes: i32) -> Option<FixedOffset> {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var).filter(|v| !v.trim().is_empty()) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            value,
            reason: e.to_string(),
        }),
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration from an arbitrary key lookup (environment, test maps).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let ttl_secs: i64 = parse_var(&lookup, "LAUNDRY_STATS_TTL_SECS", 60)?;
        if ttl_secs < 0 {
            return Err(ConfigError::Invalid {
                var: "LAUNDRY_STATS_TTL_SECS",
                value: ttl_secs.to_string(),
                reason: "must not be negative".into(),
            });
        }

        let offset_minutes: i32 = parse_var(
            &lookup,
            "LAUNDRY_UTC_OFFSET_MINUTES",
            DEFAULT_UTC_OFFSET_MINUTES,
        )?;
        let business_offset =
            offset_from_minutes(offset_minutes).ok_or_else(|| ConfigError::Invalid {
                var: "LAUNDRY_UTC_OFFSET_MINUTES",
                value: offset_minutes.to_string(),
                reason: "offset must lie strictly within +/-24h".into(),
            })?;

        let store_buffer: usize =
            parse_var(&lookup, "LAUNDRY_STORE_BUFFER", defaults.store_buffer)?;
        if store_buffer == 0 {
            return Err(ConfigError::Invalid {
                var: "LAUNDRY_STORE_BUFFER",
                value: "0".into(),
                reason: "channel capacity must be positive".into(),
            });
        }

        Ok(Self {
            stats_ttl: TimeDelta::seconds(ttl_secs),
            business_offset,
            receipt_width: parse_var(&lookup, "LAUNDRY_RECEIPT_WIDTH", defaults.receipt_width)?,
            receipt_seed: parse_var(&lookup, "LAUNDRY_RECEIPT_SEED", defaults.receipt_seed)?,
            store_buffer,
            update_retries: parse_var(
                &lookup,
                "LAUNDRY_UPDATE_RETRIES",
                defaults.update_retries,
            )?,
        })
    }
}
