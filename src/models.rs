//! Shared data structures used throughout the application.

use std::fmt;

use alloy_primitives::Address;
use serde::Serialize;
use tracing::warn;

use crate::errors::{AppError, Result};
use crate::lens::StaticView;

/// Parts-per-ten-thousand. Always within `[0, 10000]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Bps(u16);

impl Bps {
    pub const ZERO: Bps = Bps(0);
    pub const MAX: Bps = Bps(10_000);

    pub fn new(value: i64) -> Result<Self> {
        if !(0..=i64::from(Self::MAX.0)).contains(&value) {
            return Err(AppError::InvalidBps(value));
        }
        Ok(Bps(value as u16))
    }

    pub fn get(self) -> u16 {
        self.0
    }

    /// `10000 - self`, the share left after applying this rate.
    pub fn complement(self) -> Bps {
        Bps(Self::MAX.0 - self.0)
    }
}

impl TryFrom<u64> for Bps {
    type Error = AppError;

    fn try_from(value: u64) -> Result<Self> {
        i64::try_from(value)
            .map_err(|_| AppError::InvalidBps(i64::MAX))
            .and_then(Bps::new)
    }
}

impl fmt::Display for Bps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bps", self.0)
    }
}

/// Direction of a swap through the taxed pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SwapDirection {
    /// Quote in, base out. Buy tax is taken from the input.
    QuoteToBase,
    /// Base in, quote out. Sell tax is taken from the output.
    BaseToQuote,
}

impl SwapDirection {
    pub fn is_buy(self) -> bool {
        matches!(self, SwapDirection::QuoteToBase)
    }

    /// The tax rate charged in this direction.
    pub fn tax_bps(self, buy_tax_bps: Bps, sell_tax_bps: Bps) -> Bps {
        match self {
            SwapDirection::QuoteToBase => buy_tax_bps,
            SwapDirection::BaseToQuote => sell_tax_bps,
        }
    }

    /// Router path as `(token_in, token_out)`.
    pub fn path(self, quote: Address, base: Address) -> (Address, Address) {
        match self {
            SwapDirection::QuoteToBase => (quote, base),
            SwapDirection::BaseToQuote => (base, quote),
        }
    }
}

impl std::str::FromStr for SwapDirection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" | "quote_to_base" | "quotetobase" => Ok(SwapDirection::QuoteToBase),
            "sell" | "base_to_quote" | "basetoquote" => Ok(SwapDirection::BaseToQuote),
            other => Err(AppError::Config(format!("unknown swap direction `{other}`"))),
        }
    }
}

/// Tax and LP fee rates applied to a swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSchedule {
    pub buy_tax_bps: Bps,
    pub sell_tax_bps: Bps,
    pub lp_fee_bps: Bps,
}

impl Default for FeeSchedule {
    /// Untaxed pair with the standard 0.20% LP fee.
    fn default() -> Self {
        Self {
            buy_tax_bps: Bps::ZERO,
            sell_tax_bps: Bps::ZERO,
            lp_fee_bps: Bps(20),
        }
    }
}

impl FeeSchedule {
    /// Rates from the lens static segment. Any rate the lens reports above
    /// 10000 bps is replaced by the matching default.
    pub fn from_static_view(view: Option<&StaticView>, defaults: FeeSchedule) -> Self {
        let Some(view) = view else {
            return defaults;
        };
        let pick = |name: &str, raw: u64, fallback: Bps| {
            Bps::try_from(raw).unwrap_or_else(|_| {
                warn!(field = name, raw, "lens rate out of range, using default");
                fallback
            })
        };
        Self {
            buy_tax_bps: pick("buyTaxBps", view.buy_tax_bps, defaults.buy_tax_bps),
            sell_tax_bps: pick("sellTaxBps", view.sell_tax_bps, defaults.sell_tax_bps),
            lp_fee_bps: pick("lpFeeBps", view.lp_fee_bps, defaults.lp_fee_bps),
        }
    }
}
