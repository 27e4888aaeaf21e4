use alloy_primitives::Address;
use num_bigint::BigUint;

use crate::lens::PairHealthViewModel;

/// Pool balances for the two sides of a swap path, oriented input → output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReserveSnapshot {
    pub reserve_in: BigUint,
    pub reserve_out: BigUint,
}

impl ReserveSnapshot {
    pub fn new(reserve_in: BigUint, reserve_out: BigUint) -> Self {
        Self {
            reserve_in,
            reserve_out,
        }
    }

    /// Both sides must be known for a snapshot to exist.
    pub fn from_parts(reserve_in: Option<BigUint>, reserve_out: Option<BigUint>) -> Option<Self> {
        Some(Self::new(reserve_in?, reserve_out?))
    }
}

/// Orients the pair's reserve0/reserve1 along `token_in → token_out`.
///
/// Returns `None` when either token is not one of the pair's tokens.
pub fn reserves_for_path(
    view: &PairHealthViewModel,
    token_in: Address,
    token_out: Address,
) -> Option<ReserveSnapshot> {
    let reserve_of = |token: Address| {
        let statics = &view.static_data;
        if statics.token0 == Some(token) {
            Some(view.dynamic_data.reserve0.clone())
        } else if statics.token1 == Some(token) {
            Some(view.dynamic_data.reserve1.clone())
        } else {
            None
        }
    };
    ReserveSnapshot::from_parts(reserve_of(token_in), reserve_of(token_out))
}
