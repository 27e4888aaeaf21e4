//! Trade gating and swap parameters derived from pair health and user input.

use std::str::FromStr;

use alloy_primitives::Address;
use bigdecimal::BigDecimal;
use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};

use crate::dex::calc::mul_bps;
use crate::errors::{AppError, Result};
use crate::lens::{LensStatus, PairHealthStatuses, PairHealthViewModel};
use crate::models::Bps;

/// Parses a user-entered decimal amount into base units.
///
/// Returns `None` for blank, unparsable, negative or zero input. Digits past
/// `decimals` round half up.
pub fn parse_amount(text: &str, decimals: u8) -> Option<BigUint> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let value = BigDecimal::from_str(text).ok()?;
    let scaled = value * BigDecimal::new(BigInt::one(), -i64::from(decimals));
    let whole = scaled.with_scale(0);
    let (mut units, _) = whole.clone().into_bigint_and_exponent();
    if (scaled - whole) * BigDecimal::from(2) >= BigDecimal::one() {
        units += 1u32;
    }
    units.to_biguint().filter(|v| !v.is_zero())
}

/// Whether pair health forbids trading. Unknown health (`None`) blocks.
pub fn health_blocks_trade(health: Option<&PairHealthStatuses>) -> bool {
    health.is_none_or(|h| !h.overall_status.is_ok())
}

/// What the user can do next with the swap form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TradeAction {
    /// Health is unknown or not OK. Carries the overall status when known.
    BlockedByHealth(Option<LensStatus>),
    EnterAmount,
    Approve,
    AwaitQuote,
    Swap { amount_out_min: BigUint },
}

/// Snapshot of everything that gates the submit action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeReadiness {
    pub health: Option<LensStatus>,
    pub amount_in: Option<BigUint>,
    pub needs_approval: bool,
    /// Shown to the user; does not gate submission on its own.
    pub exceeds_balance: bool,
    pub amount_out_min: Option<BigUint>,
}

impl TradeReadiness {
    pub fn can_swap(&self) -> bool {
        matches!(self.next_action(), TradeAction::Swap { .. })
    }

    pub fn next_action(&self) -> TradeAction {
        if self.health != Some(LensStatus::Ok) {
            return TradeAction::BlockedByHealth(self.health);
        }
        if self.amount_in.is_none() {
            return TradeAction::EnterAmount;
        }
        if self.needs_approval {
            return TradeAction::Approve;
        }
        match &self.amount_out_min {
            Some(min) => TradeAction::Swap {
                amount_out_min: min.clone(),
            },
            None => TradeAction::AwaitQuote,
        }
    }
}

/// Inputs to [`assess`]; all values in base units of the input token except
/// `quoted_out`.
#[derive(Debug, Clone, Default)]
pub struct TradeInputs {
    /// `None` when the pair view could not be mapped.
    pub health: Option<PairHealthStatuses>,
    pub amount_in: Option<BigUint>,
    pub quoted_out: Option<BigUint>,
    pub allowance: BigUint,
    pub balance: BigUint,
    pub slippage: Bps,
}

pub fn assess(inputs: &TradeInputs) -> TradeReadiness {
    let amount_in = inputs.amount_in.clone().filter(|a| !a.is_zero());
    let needs_approval = amount_in.as_ref().is_some_and(|a| &inputs.allowance < a);
    let exceeds_balance = amount_in.as_ref().is_some_and(|a| &inputs.balance < a);
    let amount_out_min = inputs
        .quoted_out
        .as_ref()
        .map(|quoted| mul_bps(quoted, inputs.slippage.complement()));

    TradeReadiness {
        health: inputs.health.map(|h| h.overall_status),
        amount_in,
        needs_approval,
        exceeds_balance,
        amount_out_min,
    }
}

/// Arguments for a router `swapExactTokensForTokens`-style call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapPlan {
    pub amount_in: BigUint,
    pub amount_out_min: BigUint,
    /// Unix seconds.
    pub deadline: u64,
    pub path: (Address, Address),
    pub recipient: Address,
}

impl SwapPlan {
    pub fn build(
        amount_in: BigUint,
        quoted_out: &BigUint,
        slippage: Bps,
        path: (Address, Address),
        recipient: Address,
        now_unix: u64,
        ttl_secs: u64,
    ) -> Result<Self> {
        if amount_in.is_zero() {
            return Err(AppError::InvalidAmount("amount in must be positive".into()));
        }
        if path.0 == path.1 {
            return Err(AppError::Config("swap path must use two distinct tokens".into()));
        }
        Ok(Self {
            amount_in,
            amount_out_min: mul_bps(quoted_out, slippage.complement()),
            deadline: now_unix.saturating_add(ttl_secs),
            path,
            recipient,
        })
    }
}

/// The user's `(allowance, balance)` of `token_in`, as reported by the lens.
/// Tokens outside the pair report zero.
pub fn input_funds(view: &PairHealthViewModel, token_in: Address) -> (BigUint, BigUint) {
    let user = &view.user_data;
    let allowance = if user.token0 == Some(token_in) {
        user.allowance0.clone()
    } else if user.token1 == Some(token_in) {
        user.allowance1.clone()
    } else {
        BigUint::zero()
    };
    let balance = if view.static_data.quote_token == Some(token_in) {
        user.quote_balance.clone()
    } else if view.static_data.base_token == Some(token_in) {
        user.base_balance.clone()
    } else {
        BigUint::zero()
    };
    (allowance, balance)
}

/// Whether `caller` may claim the pair's accumulated quote-side tax.
pub fn can_claim_quote_tax(view: &PairHealthViewModel, caller: Address) -> bool {
    view.static_data.tax_collector == Some(caller)
        && !view.dynamic_data.accumulated_quote_tax.is_zero()
}
