//! Configuration loader and application settings.

use std::collections::HashMap;
use std::str::FromStr;

use alloy_primitives::Address;
use tracing::warn;

use crate::errors::{AppError, Result};
use crate::lens::payload::parse_address;
use crate::models::{Bps, FeeSchedule};

const REQUIRED_KEYS: &[&str] = &["PAIR_ADDRESS", "QUOTE_TOKEN", "BASE_TOKEN"];

const DEFAULT_CHAIN_ID: u64 = 31_337;
const DEFAULT_DEADLINE_SECS: u64 = 600;
const DEFAULT_POLL_INTERVAL_SECS: u64 = 15;

/// Consolidated application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub chain_id: u64,
    /// Taxed pair under watch.
    pub pair: Address,
    pub quote_token: Address,
    pub base_token: Address,
    /// Wallet whose balances and allowances the lens reports, if any.
    pub user: Option<Address>,
    pub admin_addresses: Vec<Address>,
    /// Rates used until the lens reports live ones.
    pub fee_defaults: FeeSchedule,
    pub slippage: Bps,
    pub deadline_secs: u64,
    /// Seconds between payload reads; 0 reads once.
    pub poll_interval_secs: u64,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_map(&std::env::vars().collect())
    }

    /// Build configuration from key/value pairs. All missing required keys
    /// are reported together.
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self> {
        let get = |key: &str| {
            vars.get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
        };

        let missing: Vec<String> = REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|key| get(key).is_none())
            .map(String::from)
            .collect();
        if !missing.is_empty() {
            return Err(AppError::MissingEnv(missing));
        }

        let address = |key: &str| -> Result<Address> {
            let raw = get(key).unwrap_or_default();
            parse_address(raw).ok_or_else(|| AppError::InvalidAddress(format!("{key}={raw}")))
        };

        let user = get("USER_ADDRESS")
            .map(|_| address("USER_ADDRESS"))
            .transpose()?;

        let admin_addresses = match get("ADMIN_ADDRESSES") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| {
                    parse_address(s).ok_or_else(|| {
                        AppError::InvalidAddress(format!("ADMIN_ADDRESSES entry {s}"))
                    })
                })
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };

        let chain_id: u64 = parse_number(get("CHAIN_ID"), "CHAIN_ID", DEFAULT_CHAIN_ID)?;
        if chain_id == 0 {
            return Err(AppError::Config("CHAIN_ID must be positive".into()));
        }

        let base_fees = FeeSchedule::default();
        let fee_defaults = FeeSchedule {
            buy_tax_bps: parse_bps(get("DEFAULT_BUY_TAX_BPS"), base_fees.buy_tax_bps)?,
            sell_tax_bps: parse_bps(get("DEFAULT_SELL_TAX_BPS"), base_fees.sell_tax_bps)?,
            lp_fee_bps: parse_bps(get("DEFAULT_LP_FEE_BPS"), base_fees.lp_fee_bps)?,
        };

        Ok(Self {
            chain_id,
            pair: address("PAIR_ADDRESS")?,
            quote_token: address("QUOTE_TOKEN")?,
            base_token: address("BASE_TOKEN")?,
            user,
            admin_addresses,
            fee_defaults,
            slippage: parse_bps(get("SLIPPAGE_BPS"), Bps::ZERO)?,
            deadline_secs: parse_number(
                get("DEADLINE_SECS"),
                "DEADLINE_SECS",
                DEFAULT_DEADLINE_SECS,
            )?,
            poll_interval_secs: parse_number(
                get("POLL_INTERVAL_SECS"),
                "POLL_INTERVAL_SECS",
                DEFAULT_POLL_INTERVAL_SECS,
            )?,
        })
    }

    pub fn is_admin(&self, address: Address) -> bool {
        self.admin_addresses.contains(&address)
    }
}

fn parse_number<T: FromStr>(raw: Option<&str>, key: &str, default: T) -> Result<T> {
    match raw {
        Some(v) => v.parse().map_err(|_| {
            AppError::Config(format!("{key} must be a non-negative integer, got {v}"))
        }),
        None => Ok(default),
    }
}

fn parse_bps(raw: Option<&str>, default: Bps) -> Result<Bps> {
    match raw {
        Some(v) => {
            let value: i64 = v.parse().map_err(|_| {
                warn!(value = v, "bps setting is not an integer");
                AppError::Config(format!("expected basis points, got {v}"))
            })?;
            Bps::new(value)
        }
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> HashMap<String, String> {
        [
            ("PAIR_ADDRESS", "0x7777777777777777777777777777777777777777"),
            ("QUOTE_TOKEN", "0x5555555555555555555555555555555555555555"),
            ("BASE_TOKEN", "0x6666666666666666666666666666666666666666"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn reports_all_missing_keys() {
        let err = AppConfig::from_map(&HashMap::new()).unwrap_err();
        match err {
            AppError::MissingEnv(keys) => {
                assert_eq!(keys, vec!["PAIR_ADDRESS", "QUOTE_TOKEN", "BASE_TOKEN"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn applies_defaults() {
        let cfg = AppConfig::from_map(&valid()).unwrap();
        assert_eq!(cfg.chain_id, 31_337);
        assert_eq!(cfg.fee_defaults, FeeSchedule::default());
        assert_eq!(cfg.slippage, Bps::ZERO);
        assert_eq!(cfg.deadline_secs, 600);
        assert_eq!(cfg.poll_interval_secs, 15);
        assert!(cfg.user.is_none());
        assert!(cfg.admin_addresses.is_empty());
    }

    #[test]
    fn parses_optional_settings() {
        let mut vars = valid();
        vars.insert("CHAIN_ID".into(), "10143".into());
        vars.insert("SLIPPAGE_BPS".into(), "50".into());
        vars.insert("DEFAULT_LP_FEE_BPS".into(), "30".into());
        vars.insert(
            "ADMIN_ADDRESSES".into(),
            "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa, 0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb".into(),
        );
        let cfg = AppConfig::from_map(&vars).unwrap();
        assert_eq!(cfg.chain_id, 10_143);
        assert_eq!(cfg.slippage.get(), 50);
        assert_eq!(cfg.fee_defaults.lp_fee_bps.get(), 30);
        assert_eq!(cfg.admin_addresses.len(), 2);
        assert!(cfg.is_admin(Address::repeat_byte(0xbb)));
        assert!(!cfg.is_admin(Address::repeat_byte(0xcc)));
    }

    #[test]
    fn rejects_malformed_values() {
        let mut vars = valid();
        vars.insert("ADMIN_ADDRESSES".into(), "not-an-address".into());
        let err = AppConfig::from_map(&vars).unwrap_err();
        assert!(err.to_string().contains("ADMIN_ADDRESSES"));

        let mut vars = valid();
        vars.insert("SLIPPAGE_BPS".into(), "10001".into());
        assert!(matches!(AppConfig::from_map(&vars), Err(AppError::InvalidBps(10_001))));

        let mut vars = valid();
        vars.insert("BASE_TOKEN".into(), "0x66".into());
        assert!(matches!(AppConfig::from_map(&vars), Err(AppError::InvalidAddress(_))));

        let mut vars = valid();
        vars.insert("CHAIN_ID".into(), "0".into());
        assert!(AppConfig::from_map(&vars).is_err());
    }
}
