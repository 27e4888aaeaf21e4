//! Fee and tax breakdown for a single swap through the taxed pair.
//!
//! Buys take the tax from the input before the constant-product step and the
//! LP fee from what remains. Sells run the constant-product step on the full
//! input and take the tax from the output. The order matters: swapping it
//! moves results by up to one tax unit away from what the pair contract pays.

use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Serialize, Serializer};

use crate::dex::calc::{amount_out_with_fee, gross_up, mul_bps};
use crate::dex::state::ReserveSnapshot;
use crate::models::{Bps, FeeSchedule, SwapDirection};

/// Inputs for [`compute_breakdown`]. `None` means "not known yet".
#[derive(Debug, Clone)]
pub struct BreakdownParams {
    pub direction: SwapDirection,
    /// User input in base units; `None` until a valid amount is entered.
    pub amount_in: Option<BigUint>,
    /// Router quote for `amount_in`, already net of every tax and fee.
    pub quoted_out: Option<BigUint>,
    pub reserves: Option<ReserveSnapshot>,
    pub buy_tax_bps: Bps,
    pub sell_tax_bps: Bps,
    pub lp_fee_bps: Bps,
}

impl BreakdownParams {
    pub fn new(direction: SwapDirection, fees: FeeSchedule) -> Self {
        Self {
            direction,
            amount_in: None,
            quoted_out: None,
            reserves: None,
            buy_tax_bps: fees.buy_tax_bps,
            sell_tax_bps: fees.sell_tax_bps,
            lp_fee_bps: fees.lp_fee_bps,
        }
    }

    pub fn amount_in(mut self, amount: Option<BigUint>) -> Self {
        self.amount_in = amount;
        self
    }

    pub fn quoted_out(mut self, amount: Option<BigUint>) -> Self {
        self.quoted_out = amount;
        self
    }

    pub fn reserves(mut self, reserves: Option<ReserveSnapshot>) -> Self {
        self.reserves = reserves;
        self
    }
}

/// Economic breakdown of one swap. Every amount is in base units of the
/// token it is denominated in; `None` marks a value that could not be
/// computed from the inputs given, which is distinct from a computed zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmountLedger {
    pub direction: SwapDirection,
    pub lp_fee_bps: Bps,
    /// Tax rate applied in this direction.
    pub tax_bps: Bps,
    #[serde(serialize_with = "decimal_opt")]
    pub input_amount: Option<BigUint>,
    #[serde(serialize_with = "decimal_opt")]
    pub tax_amount_in: Option<BigUint>,
    #[serde(serialize_with = "decimal_opt")]
    pub effective_swap_input: Option<BigUint>,
    #[serde(serialize_with = "decimal_opt")]
    pub lp_fee_amount: Option<BigUint>,
    #[serde(serialize_with = "decimal_opt")]
    pub gross_output: Option<BigUint>,
    #[serde(serialize_with = "decimal_opt")]
    pub tax_amount_out: Option<BigUint>,
    #[serde(serialize_with = "decimal_opt")]
    pub net_output: Option<BigUint>,
}

impl AmountLedger {
    /// Tax taken on both legs, when both are known.
    pub fn total_tax(&self) -> Option<BigUint> {
        match (&self.tax_amount_in, &self.tax_amount_out) {
            (Some(tax_in), Some(tax_out)) => Some(tax_in + tax_out),
            _ => None,
        }
    }
}

// Amounts cross the boundary as decimal strings so no precision is lost.
fn decimal_opt<S: Serializer>(value: &Option<BigUint>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => serializer.serialize_str(&v.to_str_radix(10)),
        None => serializer.serialize_none(),
    }
}

/// Reconstructs fees, taxes and gross/net amounts for a swap.
///
/// Never fails: when an input needed for a field is missing, that field is
/// `None`. Without `amount_in` only `net_output` survives, carrying the
/// caller's quote through.
pub fn compute_breakdown(params: &BreakdownParams) -> AmountLedger {
    let tax_bps = params
        .direction
        .tax_bps(params.buy_tax_bps, params.sell_tax_bps);

    let Some(amount_in) = params.amount_in.as_ref() else {
        return AmountLedger {
            direction: params.direction,
            lp_fee_bps: params.lp_fee_bps,
            tax_bps,
            input_amount: None,
            tax_amount_in: None,
            effective_swap_input: None,
            lp_fee_amount: None,
            gross_output: None,
            tax_amount_out: None,
            net_output: params.quoted_out.clone(),
        };
    };

    match params.direction {
        SwapDirection::QuoteToBase => buy_breakdown(params, amount_in, tax_bps),
        SwapDirection::BaseToQuote => sell_breakdown(params, amount_in, tax_bps),
    }
}

fn buy_breakdown(params: &BreakdownParams, amount_in: &BigUint, tax_bps: Bps) -> AmountLedger {
    let tax_amount_in = mul_bps(amount_in, params.buy_tax_bps);
    let effective_swap_input = amount_in - &tax_amount_in;
    let lp_fee_amount = mul_bps(&effective_swap_input, params.lp_fee_bps);
    let gross_output = params.reserves.as_ref().map(|r| {
        amount_out_with_fee(
            &effective_swap_input,
            &r.reserve_in,
            &r.reserve_out,
            params.lp_fee_bps,
        )
    });
    let net_output = params.quoted_out.clone().or_else(|| gross_output.clone());

    AmountLedger {
        direction: params.direction,
        lp_fee_bps: params.lp_fee_bps,
        tax_bps,
        input_amount: Some(amount_in.clone()),
        tax_amount_in: Some(tax_amount_in),
        effective_swap_input: Some(effective_swap_input),
        lp_fee_amount: Some(lp_fee_amount),
        gross_output,
        tax_amount_out: Some(BigUint::zero()),
        net_output,
    }
}

fn sell_breakdown(params: &BreakdownParams, amount_in: &BigUint, tax_bps: Bps) -> AmountLedger {
    let lp_fee_amount = mul_bps(amount_in, params.lp_fee_bps);
    let gross_output = match (&params.reserves, &params.quoted_out) {
        (Some(r), _) => Some(amount_out_with_fee(
            amount_in,
            &r.reserve_in,
            &r.reserve_out,
            params.lp_fee_bps,
        )),
        (None, Some(quoted)) => gross_up(quoted, params.sell_tax_bps),
        (None, None) => None,
    };
    let net_output = params.quoted_out.clone().or_else(|| {
        gross_output
            .as_ref()
            .map(|gross| mul_bps(gross, params.sell_tax_bps.complement()))
    });
    // A quote above the reserve-derived gross would mean a negative tax.
    let tax_amount_out = match (&gross_output, &net_output) {
        (Some(gross), Some(net)) if gross >= net => Some(gross - net),
        _ => None,
    };

    AmountLedger {
        direction: params.direction,
        lp_fee_bps: params.lp_fee_bps,
        tax_bps,
        input_amount: Some(amount_in.clone()),
        tax_amount_in: Some(BigUint::zero()),
        effective_swap_input: Some(amount_in.clone()),
        lp_fee_amount: Some(lp_fee_amount),
        gross_output,
        tax_amount_out,
        net_output,
    }
}
