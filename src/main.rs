use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use num_bigint::BigUint;
use serde_json::Value;
use taxpair_engine::{
    config::AppConfig,
    dex::{BreakdownParams, compute_breakdown, reserves_for_path},
    lens::{self, status_label},
    models::{FeeSchedule, SwapDirection},
    trade::{self, SwapPlan, TradeInputs},
    utils,
};
use tracing::{info, warn};

/// Everything one evaluation pass needs besides the payload itself.
struct WatchContext {
    config: AppConfig,
    payload_path: PathBuf,
    direction: SwapDirection,
    decimals: u8,
    amount_in: Option<BigUint>,
    quoted_out: Option<BigUint>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    utils::init_logging();

    let config = AppConfig::from_env().context("loading configuration")?;
    let payload_path: PathBuf = std::env::var("PAYLOAD_PATH")
        .context("Set PAYLOAD_PATH to a JSON file holding the lens pair view")?
        .into();
    let direction: SwapDirection = std::env::var("DIRECTION")
        .unwrap_or_else(|_| "buy".into())
        .parse()?;
    let decimals: u8 = std::env::var("TOKEN_DECIMALS")
        .unwrap_or_else(|_| "18".into())
        .parse()
        .context("TOKEN_DECIMALS must fit in a u8")?;
    let amount_in = std::env::var("AMOUNT_IN")
        .ok()
        .and_then(|v| trade::parse_amount(&v, decimals));
    let quoted_out = match std::env::var("QUOTED_OUT") {
        Ok(v) => Some(
            v.trim()
                .parse::<BigUint>()
                .context("QUOTED_OUT must be an integer amount in base units")?,
        ),
        Err(_) => None,
    };

    info!(
        pair = %config.pair,
        chain_id = config.chain_id,
        ?direction,
        poll_interval_secs = config.poll_interval_secs,
        "[INIT] taxpair-watch starting"
    );

    let ctx = WatchContext {
        config,
        payload_path,
        direction,
        decimals,
        amount_in,
        quoted_out,
    };

    if ctx.config.poll_interval_secs == 0 {
        return evaluate(&ctx).await;
    }

    let mut ticker = tokio::time::interval(Duration::from_secs(ctx.config.poll_interval_secs));
    loop {
        ticker.tick().await;
        if let Err(e) = evaluate(&ctx).await {
            warn!(error = %e, "[WATCH] evaluation failed");
        }
    }
}

async fn evaluate(ctx: &WatchContext) -> Result<()> {
    let text = tokio::fs::read_to_string(&ctx.payload_path)
        .await
        .with_context(|| format!("reading {}", ctx.payload_path.display()))?;
    let raw: Value = serde_json::from_str(&text).context("pair view is not valid JSON")?;

    let view = lens::map_pair_health_payload(&raw);
    let statuses = view
        .as_ref()
        .map(|v| v.statuses)
        .or_else(|| lens::map_pair_view_statuses(&raw));
    info!(
        overall = %status_label(statuses.map(|s| s.overall_status)),
        view_ok = view.is_some(),
        "[HEALTH] pair view read"
    );

    let config = &ctx.config;
    let fees = FeeSchedule::from_static_view(
        view.as_ref().map(|v| &v.static_data),
        config.fee_defaults,
    );
    let path = ctx.direction.path(config.quote_token, config.base_token);
    let reserves = view
        .as_ref()
        .and_then(|v| reserves_for_path(v, path.0, path.1));

    let ledger = compute_breakdown(
        &BreakdownParams::new(ctx.direction, fees)
            .amount_in(ctx.amount_in.clone())
            .quoted_out(ctx.quoted_out.clone())
            .reserves(reserves),
    );
    info!(
        ledger = %serde_json::to_string(&ledger)?,
        net_output = %utils::format_units(ledger.net_output.as_ref(), ctx.decimals),
        tax = %utils::format_bps(u64::from(ledger.tax_bps.get())),
        "[BREAKDOWN]"
    );

    let (allowance, balance) = view
        .as_ref()
        .map(|v| trade::input_funds(v, path.0))
        .unwrap_or_default();
    let readiness = trade::assess(&TradeInputs {
        health: view.as_ref().map(|v| v.statuses),
        amount_in: ctx.amount_in.clone(),
        quoted_out: ledger.net_output.clone(),
        allowance,
        balance,
        slippage: config.slippage,
    });
    info!(
        action = ?readiness.next_action(),
        exceeds_balance = readiness.exceeds_balance,
        "[GATE]"
    );

    if let (Some(user), Some(view)) = (config.user, view.as_ref()) {
        if trade::can_claim_quote_tax(view, user) {
            info!(
                user = %utils::short_address(Some(user)),
                accumulated = %view.dynamic_data.accumulated_quote_tax,
                "[TAX] quote tax claimable"
            );
        }
        if let (true, Some(amount), Some(quoted)) = (
            readiness.can_swap(),
            readiness.amount_in.clone(),
            ledger.net_output.as_ref(),
        ) {
            let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
            let plan = SwapPlan::build(
                amount,
                quoted,
                config.slippage,
                path,
                user,
                now,
                config.deadline_secs,
            )?;
            info!(
                amount_in = %plan.amount_in,
                amount_out_min = %plan.amount_out_min,
                deadline = plan.deadline,
                "[PLAN] swap ready"
            );
        }
    }

    Ok(())
}
