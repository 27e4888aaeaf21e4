//! Swap arithmetic for the taxed constant-product pair.

pub mod breakdown;
pub mod calc;
pub mod state;

pub use breakdown::{AmountLedger, BreakdownParams, compute_breakdown};
pub use calc::{BPS_DENOMINATOR, amount_out_with_fee, apply_slippage, ceil_div, gross_up, mul_bps};
pub use state::{ReserveSnapshot, reserves_for_path};
