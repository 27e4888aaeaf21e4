use num_bigint::{BigInt, BigUint, Sign};
use num_traits::Zero;

use crate::errors::{AppError, Result};
use crate::models::Bps;

pub const BPS_DENOMINATOR: u32 = 10_000;

fn denominator() -> BigUint {
    BigUint::from(BPS_DENOMINATOR)
}

/// `floor(amount * bps / 10000)`
pub fn mul_bps(amount: &BigUint, bps: Bps) -> BigUint {
    amount * BigUint::from(bps.get()) / denominator()
}

/// Ceiling division for a positive divisor.
pub fn ceil_div(a: &BigUint, b: &BigUint) -> BigUint {
    debug_assert!(!b.is_zero(), "ceil_div by zero");
    (a + b - 1u32) / b
}

/// Constant-product output for `amount_in` after the LP fee.
///
/// `floor(amountInWithFee * reserveOut / (reserveIn * 10000 + amountInWithFee))`
/// where `amountInWithFee = amount_in * (10000 - lp_fee_bps)`.
///
/// An empty side (zero input or zero reserve) yields nothing.
pub fn amount_out_with_fee(
    amount_in: &BigUint,
    reserve_in: &BigUint,
    reserve_out: &BigUint,
    lp_fee_bps: Bps,
) -> BigUint {
    if amount_in.is_zero() || reserve_in.is_zero() || reserve_out.is_zero() {
        return BigUint::zero();
    }

    let amount_in_with_fee = amount_in * BigUint::from(lp_fee_bps.complement().get());
    let numerator = &amount_in_with_fee * reserve_out;
    let denom = reserve_in * denominator() + &amount_in_with_fee;
    numerator / denom
}

/// Grosses up an after-tax amount: `ceil(net * 10000 / (10000 - tax_bps))`.
///
/// Returns `None` for a 100% tax, where nothing can be inverted.
pub fn gross_up(net: &BigUint, tax_bps: Bps) -> Option<BigUint> {
    let keep = tax_bps.complement();
    if keep.get() == 0 {
        return None;
    }
    Some(ceil_div(&(net * denominator()), &BigUint::from(keep.get())))
}

/// Minimum acceptable output: `floor(amount * (10000 - tolerance_bps) / 10000)`.
///
/// Negative amounts and tolerances outside `[0, 10000]` are caller errors.
pub fn apply_slippage(amount: &BigInt, tolerance_bps: i64) -> Result<BigUint> {
    if amount.sign() == Sign::Minus {
        return Err(AppError::NegativeAmount);
    }
    let tolerance = Bps::new(tolerance_bps)?;
    let amount = amount.magnitude();
    Ok(amount * BigUint::from(tolerance.complement().get()) / denominator())
}
