use std::fmt;

use alloy_primitives::Address;
use num_bigint::BigUint;
use serde::Serialize;

/// Health code reported by the lens for a segment of a pair view.
///
/// The discriminants are wire codes only. Severity is decided by
/// [`resolve_overall_status`](super::resolve_overall_status), not by ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LensStatus {
    #[default]
    Ok = 0,
    InvalidPair = 1,
    Degraded = 2,
}

impl LensStatus {
    /// Maps a wire code. Anything other than 1 or 2 reads as `Ok`.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => LensStatus::InvalidPair,
            2 => LensStatus::Degraded,
            _ => LensStatus::Ok,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn is_ok(self) -> bool {
        self == LensStatus::Ok
    }
}

impl fmt::Display for LensStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LensStatus::Ok => "OK",
            LensStatus::InvalidPair => "INVALID_PAIR",
            LensStatus::Degraded => "DEGRADED",
        };
        f.write_str(label)
    }
}

/// Per-segment statuses plus the reduced overall status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairHealthStatuses {
    pub static_status: LensStatus,
    pub dynamic_status: LensStatus,
    pub user_status: LensStatus,
    pub overall_status: LensStatus,
}

/// Pair configuration. Bps-like values are raw counts as read; they are
/// range-checked when turned into a fee schedule.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StaticView {
    pub pair: Option<Address>,
    pub token0: Option<Address>,
    pub token1: Option<Address>,
    pub quote_token: Option<Address>,
    pub base_token: Option<Address>,
    pub is_quote0: bool,
    pub supports_tax: bool,
    pub buy_tax_bps: u64,
    pub sell_tax_bps: u64,
    pub tax_collector: Option<Address>,
    pub lp_fee_bps: u64,
}

/// Reserve accounting. `raw*` are token balances held by the pair,
/// `effective*` exclude accrued quote tax, `dust*` is the unaccounted excess.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DynamicView {
    pub pair: Option<Address>,
    pub reserve0: BigUint,
    pub reserve1: BigUint,
    pub block_timestamp_last: u64,
    pub raw0: BigUint,
    pub raw1: BigUint,
    pub accumulated_quote_tax: BigUint,
    pub effective0: BigUint,
    pub effective1: BigUint,
    pub expected_raw0: BigUint,
    pub expected_raw1: BigUint,
    pub dust0: BigUint,
    pub dust1: BigUint,
    pub accounting_ok: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserView {
    pub pair: Option<Address>,
    pub user: Option<Address>,
    pub token0: Option<Address>,
    pub token1: Option<Address>,
    pub balance0: BigUint,
    pub balance1: BigUint,
    pub allowance0: BigUint,
    pub allowance1: BigUint,
    pub quote_balance: BigUint,
    pub base_balance: BigUint,
}

/// Typed pair health read. Built whole from one payload and never patched;
/// the next read replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairHealthViewModel {
    pub statuses: PairHealthStatuses,
    pub static_data: StaticView,
    pub dynamic_data: DynamicView,
    pub user_data: UserView,
}
