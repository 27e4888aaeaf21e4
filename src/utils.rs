//! Miscellaneous helper utilities.

use alloy_primitives::{Address, hex};
use num_bigint::BigUint;
use tracing_subscriber::{EnvFilter, fmt};

/// Fraction digits kept when rendering token amounts.
const DISPLAY_DECIMALS: u8 = 6;

/// Initialize `tracing` subscriber with env-based filter.
///
/// If `RUST_LOG` is not set, defaults to `info` level.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

/// Renders base units as a decimal token amount, rounded half up to six
/// fraction digits with trailing zeros removed. `None` renders as `-`.
pub fn format_units(value: Option<&BigUint>, decimals: u8) -> String {
    let Some(value) = value else {
        return "-".to_string();
    };
    let shown = decimals.min(DISPLAY_DECIMALS);
    let dropped = BigUint::from(10u32).pow(u32::from(decimals - shown));
    let mut scaled = value / &dropped;
    if (value % &dropped) * 2u32 >= dropped {
        scaled += 1u32;
    }

    let unit = BigUint::from(10u32).pow(u32::from(shown));
    let whole = &scaled / &unit;
    let width = usize::from(shown);
    let frac = format!("{:0>width$}", (&scaled % &unit).to_str_radix(10));
    let frac = frac.trim_end_matches('0');
    if frac.is_empty() {
        whole.to_str_radix(10)
    } else {
        format!("{whole}.{frac}")
    }
}

/// `300` → `3.00% (300 bps)`
pub fn format_bps(bps: u64) -> String {
    format!("{}.{:02}% ({bps} bps)", bps / 100, bps % 100)
}

/// `0x1234...abcd`, or `-` when absent.
pub fn short_address(address: Option<Address>) -> String {
    match address {
        Some(a) => {
            let digits = hex::encode(a);
            format!("0x{}...{}", &digits[..4], &digits[digits.len() - 4..])
        }
        None => "-".to_string(),
    }
}
