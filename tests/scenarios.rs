use alloy_primitives::Address;
use num_bigint::{BigInt, BigUint};
use serde_json::{Value, json};
use taxpair_engine::dex::{
    BreakdownParams, ReserveSnapshot, apply_slippage, compute_breakdown, reserves_for_path,
};
use taxpair_engine::lens::{LensStatus, map_pair_health_payload, resolve_overall_status};
use taxpair_engine::models::{Bps, FeeSchedule, SwapDirection};
use taxpair_engine::trade::{self, TradeAction, TradeInputs};

const PAIR: &str = "0x1000000000000000000000000000000000000001";
const QUOTE: &str = "0x1000000000000000000000000000000000000002";
const BASE: &str = "0x1000000000000000000000000000000000000003";
const COLLECTOR: &str = "0x1000000000000000000000000000000000000004";
const USER: &str = "0x1000000000000000000000000000000000000005";

fn big(v: u64) -> BigUint {
    BigUint::from(v)
}

fn addr(s: &str) -> Address {
    s.parse().unwrap()
}

fn fees(buy: i64, sell: i64, lp: i64) -> FeeSchedule {
    FeeSchedule {
        buy_tax_bps: Bps::new(buy).unwrap(),
        sell_tax_bps: Bps::new(sell).unwrap(),
        lp_fee_bps: Bps::new(lp).unwrap(),
    }
}

fn positional_payload(dynamic_status: u8) -> Value {
    json!([
        [0, PAIR, QUOTE, BASE, QUOTE, BASE, true, true, 300, 500, COLLECTOR, 20],
        [
            dynamic_status, PAIR, "1000000", "2000000", 1_700_000_000,
            "1000010", "2000000", "10", "1000000", "2000000",
            "1000000", "2000000", "10", "0", true
        ],
        [0, PAIR, USER, QUOTE, BASE, "500", "600", "700", "800", "500", "600"]
    ])
}

fn keyed_payload(dynamic_status: u8) -> Value {
    json!({
        "s": {
            "status": 0, "pair": PAIR, "token0": QUOTE, "token1": BASE,
            "quoteToken": QUOTE, "baseToken": BASE, "isQuote0": true,
            "supportsTax": true, "buyTaxBps": 300, "sellTaxBps": 500,
            "taxCollector": COLLECTOR, "lpFeeBps": 20
        },
        "d": {
            "status": dynamic_status, "pair": PAIR, "reserve0": "1000000",
            "reserve1": "2000000", "blockTimestampLast": 1_700_000_000,
            "raw0": "1000010", "raw1": "2000000", "accumulatedQuoteTax": "10",
            "effective0": "1000000", "effective1": "2000000",
            "expectedRaw0": "1000000", "expectedRaw1": "2000000",
            "dust0": "10", "dust1": "0", "accountingOk": true
        },
        "u": {
            "status": 0, "pair": PAIR, "user": USER, "token0": QUOTE,
            "token1": BASE, "balance0": "500", "balance1": "600",
            "allowance0": "700", "allowance1": "800",
            "quoteBalance": "500", "baseBalance": "600"
        }
    })
}

#[test]
fn buy_scenario() {
    let ledger = compute_breakdown(
        &BreakdownParams::new(SwapDirection::QuoteToBase, fees(300, 500, 20))
            .amount_in(Some(big(100_000)))
            .quoted_out(Some(big(50_000)))
            .reserves(Some(ReserveSnapshot::new(big(1_000_000), big(1_000_000)))),
    );
    assert_eq!(ledger.tax_amount_in, Some(big(3_000)));
    assert_eq!(ledger.effective_swap_input, Some(big(97_000)));
    assert_eq!(ledger.lp_fee_amount, Some(big(194)));
    assert_eq!(ledger.tax_amount_out, Some(big(0)));
    assert!(ledger.net_output.is_some());
}

#[test]
fn sell_scenario() {
    let ledger = compute_breakdown(
        &BreakdownParams::new(SwapDirection::BaseToQuote, fees(300, 500, 20))
            .amount_in(Some(big(100_000)))
            .quoted_out(Some(big(90_000))),
    );
    assert_eq!(ledger.lp_fee_amount, Some(big(200)));
    assert_eq!(ledger.gross_output, Some(big(94_737)));
    assert_eq!(ledger.tax_amount_out, Some(big(4_737)));
}

#[test]
fn status_priority_scenario() {
    use LensStatus::{Degraded, InvalidPair, Ok};
    assert_eq!(resolve_overall_status(&[Ok, Degraded, InvalidPair]), InvalidPair);
    assert_eq!(resolve_overall_status(&[Ok, Degraded, Ok]), Degraded);
    assert_eq!(resolve_overall_status(&[Ok, Ok, Ok]), Ok);
}

#[test]
fn slippage_scenario() {
    assert_eq!(apply_slippage(&BigInt::from(1_000_000), 50).unwrap(), big(995_000));
    assert_eq!(apply_slippage(&BigInt::from(1_234), 0).unwrap(), big(1_234));
}

#[test]
fn positional_and_keyed_payloads_agree() {
    let positional = map_pair_health_payload(&positional_payload(2)).unwrap();
    let keyed = map_pair_health_payload(&keyed_payload(2)).unwrap();
    assert_eq!(positional, keyed);
    assert_eq!(keyed.statuses.overall_status, LensStatus::Degraded);
}

#[test]
fn short_positional_segment_is_invalid() {
    let mut payload = positional_payload(0);
    payload[0].as_array_mut().unwrap().pop();
    assert!(map_pair_health_payload(&payload).is_none());

    let two_segments = json!([positional_payload(0)[0], positional_payload(0)[1]]);
    assert!(map_pair_health_payload(&two_segments).is_none());
}

#[test]
fn reserves_follow_the_swap_path() {
    let view = map_pair_health_payload(&keyed_payload(0)).unwrap();
    let (quote, base) = (addr(QUOTE), addr(BASE));

    let buy = reserves_for_path(&view, quote, base).unwrap();
    assert_eq!(buy, ReserveSnapshot::new(big(1_000_000), big(2_000_000)));
    let sell = reserves_for_path(&view, base, quote).unwrap();
    assert_eq!(sell, ReserveSnapshot::new(big(2_000_000), big(1_000_000)));

    assert!(reserves_for_path(&view, addr(USER), base).is_none());
}

#[test]
fn mapped_view_drives_the_trade_gate() {
    let view = map_pair_health_payload(&keyed_payload(0)).unwrap();
    let fees = FeeSchedule::from_static_view(Some(&view.static_data), FeeSchedule::default());
    assert_eq!(fees, self::fees(300, 500, 20));

    let (allowance, balance) = trade::input_funds(&view, addr(QUOTE));
    assert_eq!((allowance.clone(), balance.clone()), (big(700), big(500)));

    let readiness = trade::assess(&TradeInputs {
        health: Some(view.statuses),
        amount_in: Some(big(400)),
        quoted_out: Some(big(750)),
        allowance,
        balance,
        slippage: Bps::new(100).unwrap(),
    });
    assert_eq!(
        readiness.next_action(),
        TradeAction::Swap {
            amount_out_min: big(742)
        }
    );

    let degraded = map_pair_health_payload(&keyed_payload(2)).unwrap();
    let readiness = trade::assess(&TradeInputs {
        health: Some(degraded.statuses),
        amount_in: Some(big(400)),
        ..TradeInputs::default()
    });
    assert_eq!(
        readiness.next_action(),
        TradeAction::BlockedByHealth(Some(LensStatus::Degraded))
    );
}

#[test]
fn only_the_collector_claims_tax() {
    let view = map_pair_health_payload(&keyed_payload(0)).unwrap();
    assert!(trade::can_claim_quote_tax(&view, addr(COLLECTOR)));
    assert!(!trade::can_claim_quote_tax(&view, addr(USER)));

    let mut drained = keyed_payload(0);
    drained["d"]["accumulatedQuoteTax"] = json!("0");
    let view = map_pair_health_payload(&drained).unwrap();
    assert!(!trade::can_claim_quote_tax(&view, addr(COLLECTOR)));
}

#[test]
fn hex_encoded_fields_reach_the_gate_and_fees() {
    let mut payload = keyed_payload(0);
    payload["d"]["status"] = json!("0x2");
    payload["s"]["buyTaxBps"] = json!("0x12c");
    payload["s"]["sellTaxBps"] = json!("0x1f4");
    let view = map_pair_health_payload(&payload).unwrap();

    assert_eq!(view.statuses.overall_status, LensStatus::Degraded);
    let fees = FeeSchedule::from_static_view(Some(&view.static_data), FeeSchedule::default());
    assert_eq!(fees, self::fees(300, 500, 20));

    let readiness = trade::assess(&TradeInputs {
        health: Some(view.statuses),
        amount_in: Some(big(400)),
        quoted_out: Some(big(750)),
        allowance: big(700),
        balance: big(500),
        slippage: Bps::ZERO,
    });
    assert!(!readiness.can_swap());
}
