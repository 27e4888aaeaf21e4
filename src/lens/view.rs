use serde_json::Value;
use tracing::debug;

use super::payload::{DYNAMIC_FIELDS, FieldReader, STATIC_FIELDS, Segment, USER_FIELDS};
use super::status::{classify_segment_status, split_segments};
use super::types::{DynamicView, PairHealthStatuses, PairHealthViewModel, StaticView, UserView};

/// Builds the typed health view from a raw pair-view payload.
///
/// The payload is a 3-element sequence or an object with `s`, `d` and `u`,
/// and each segment must be a sequence or mapping carrying all of its
/// fields. Anything else yields `None` and nothing partial is returned.
/// Individual field values that do not coerce take their default.
pub fn map_pair_health_payload(raw: &Value) -> Option<PairHealthViewModel> {
    let Some([s, d, u]) = split_segments(raw) else {
        debug!("pair view rejected: expected 3 segments or an s/d/u object");
        return None;
    };

    let readers = (
        Segment::from_value(s).and_then(|seg| FieldReader::new(seg, STATIC_FIELDS)),
        Segment::from_value(d).and_then(|seg| FieldReader::new(seg, DYNAMIC_FIELDS)),
        Segment::from_value(u).and_then(|seg| FieldReader::new(seg, USER_FIELDS)),
    );
    let (Some(static_seg), Some(dynamic_seg), Some(user_seg)) = readers else {
        debug!("pair view rejected: malformed or incomplete segment");
        return None;
    };

    Some(PairHealthViewModel {
        statuses: PairHealthStatuses::from_segments(
            classify_segment_status(s),
            classify_segment_status(d),
            classify_segment_status(u),
        ),
        static_data: read_static(&static_seg),
        dynamic_data: read_dynamic(&dynamic_seg),
        user_data: read_user(&user_seg),
    })
}

fn read_static(seg: &FieldReader<'_>) -> StaticView {
    StaticView {
        pair: seg.address("pair"),
        token0: seg.address("token0"),
        token1: seg.address("token1"),
        quote_token: seg.address("quoteToken"),
        base_token: seg.address("baseToken"),
        is_quote0: seg.flag("isQuote0"),
        supports_tax: seg.flag("supportsTax"),
        buy_tax_bps: seg.count("buyTaxBps"),
        sell_tax_bps: seg.count("sellTaxBps"),
        tax_collector: seg.address("taxCollector"),
        lp_fee_bps: seg.count("lpFeeBps"),
    }
}

fn read_dynamic(seg: &FieldReader<'_>) -> DynamicView {
    DynamicView {
        pair: seg.address("pair"),
        reserve0: seg.amount("reserve0"),
        reserve1: seg.amount("reserve1"),
        block_timestamp_last: seg.count("blockTimestampLast"),
        raw0: seg.amount("raw0"),
        raw1: seg.amount("raw1"),
        accumulated_quote_tax: seg.amount("accumulatedQuoteTax"),
        effective0: seg.amount("effective0"),
        effective1: seg.amount("effective1"),
        expected_raw0: seg.amount("expectedRaw0"),
        expected_raw1: seg.amount("expectedRaw1"),
        dust0: seg.amount("dust0"),
        dust1: seg.amount("dust1"),
        accounting_ok: seg.flag("accountingOk"),
    }
}

fn read_user(seg: &FieldReader<'_>) -> UserView {
    UserView {
        pair: seg.address("pair"),
        user: seg.address("user"),
        token0: seg.address("token0"),
        token1: seg.address("token1"),
        balance0: seg.amount("balance0"),
        balance1: seg.amount("balance1"),
        allowance0: seg.amount("allowance0"),
        allowance1: seg.amount("allowance1"),
        quote_balance: seg.amount("quoteBalance"),
        base_balance: seg.amount("baseBalance"),
    }
}
