//! Bonding Curve Market Simulation
//!
//! Maps a token's capitalization to bonding-curve progress and graduation
//! status, and defines how capitalization moves in response to trades and
//! background drift.
//!
//! Every capitalization change goes through [`reprice`], which is the only
//! place progress and status are derived. Graduation is one-way: once a token
//! reaches Raydium it stays there no matter what its capitalization does.

use chrono::Utc;
use rand::Rng;
use thiserror::Error;
use tracing::{debug, info};

use super::token::{new_token_id, placeholder_image_url, Token, TokenDraft, TokenStatus};
use super::trade::TradeSide;

/// Capitalization at which a token completes the curve
pub const GRADUATION_CAP: f64 = 69_000.0;

/// Capitalization change per unit of base currency traded
pub const IMPACT_RATE: f64 = 200.0;

/// Floor for capitalization under selling pressure
pub const MIN_CAP: f64 = 500.0;

/// Starting capitalization when the launch form leaves it empty
pub const DEFAULT_INITIAL_CAP: f64 = 500.0;

/// Chance that a token drifts on a given tick
pub const DEFAULT_DRIFT_PROBABILITY: f64 = 0.3;

/// Upper bound (exclusive) of a single drift increase
pub const DEFAULT_DRIFT_MAX_INCREASE: f64 = 500.0;

/// Progress value of a completed curve
pub const MAX_PROGRESS: f64 = 100.0;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MarketError {
    #[error("Trade amount must be a finite positive number, got {0}")]
    InvalidAmount(f64),
    #[error("Trade of {0} would push market cap out of range")]
    CapOverflow(f64),
}

/// Background drift parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftParams {
    /// Probability (0.0 - 1.0) that a token drifts on a tick
    pub probability: f64,
    /// Exclusive upper bound of the uniform increase
    pub max_increase: f64,
}

impl Default for DriftParams {
    fn default() -> Self {
        Self {
            probability: DEFAULT_DRIFT_PROBABILITY,
            max_increase: DEFAULT_DRIFT_MAX_INCREASE,
        }
    }
}

/// Bonding curve completion for a capitalization, clamped to [0, 100]
pub fn progress_for(market_cap: f64) -> f64 {
    if market_cap.is_nan() {
        return 0.0;
    }
    (market_cap / GRADUATION_CAP * MAX_PROGRESS).clamp(0.0, MAX_PROGRESS)
}

/// Status implied by a progress value
pub fn status_for(progress: f64) -> TokenStatus {
    if progress >= MAX_PROGRESS {
        TokenStatus::Raydium
    } else {
        TokenStatus::BondingCurve
    }
}

/// Set a new capitalization and re-derive progress and status.
///
/// A graduated token keeps `Raydium` and full progress.
pub fn reprice(mut token: Token, market_cap: f64) -> Token {
    token.market_cap = market_cap;

    if token.status.is_graduated() {
        token.bonding_curve_progress = MAX_PROGRESS;
        return token;
    }

    let progress = progress_for(market_cap);
    token.bonding_curve_progress = progress;
    token.status = status_for(progress);

    if token.status.is_graduated() {
        info!(
            "{} ({}) graduated to Raydium at ${:.0} market cap",
            token.name, token.ticker, market_cap
        );
    }

    token
}

/// Reject amounts the simulation must never see
pub fn validate_trade_amount(amount: f64) -> Result<f64, MarketError> {
    if !(amount.is_finite() && amount > 0.0) {
        return Err(MarketError::InvalidAmount(amount));
    }
    if !(amount * IMPACT_RATE).is_finite() {
        return Err(MarketError::CapOverflow(amount));
    }
    Ok(amount)
}

/// Capitalization change caused by a trade
pub fn price_impact(side: TradeSide, amount: f64) -> f64 {
    let impact = amount * IMPACT_RATE;
    match side {
        TradeSide::Buy => impact,
        TradeSide::Sell => -impact,
    }
}

/// Apply a simulated trade. `amount` must already be validated.
pub fn apply_trade(token: Token, side: TradeSide, amount: f64) -> Token {
    let market_cap = (token.market_cap + price_impact(side, amount)).max(MIN_CAP);
    debug!(
        "{} {} {:.2} -> market cap ${:.0} => ${:.0}",
        side, token.ticker, amount, token.market_cap, market_cap
    );
    reprice(token, market_cap)
}

/// Validate `amount` and apply the trade, refusing any result whose market
/// cap is not finite.
pub fn try_apply_trade(token: Token, side: TradeSide, amount: f64) -> Result<Token, MarketError> {
    let amount = validate_trade_amount(amount)?;
    let market_cap = token.market_cap + price_impact(side, amount);
    if !market_cap.is_finite() {
        return Err(MarketError::CapOverflow(amount));
    }
    Ok(apply_trade(token, side, amount))
}

/// Apply one tick of background drift.
///
/// Graduated tokens are returned untouched.
pub fn apply_drift<R: Rng + ?Sized>(token: Token, rng: &mut R, params: &DriftParams) -> Token {
    if token.is_graduated() {
        return token;
    }

    if rng.gen::<f64>() >= params.probability {
        return token;
    }

    let increase = rng.gen::<f64>() * params.max_increase;
    let market_cap = token.market_cap + increase;
    reprice(token, market_cap)
}

/// Build a new token from a launch draft
pub fn create_token<R: Rng + ?Sized>(draft: TokenDraft, creator: &str, rng: &mut R) -> Token {
    let initial_cap = draft
        .market_cap
        .filter(|cap| cap.is_finite() && *cap > 0.0)
        .unwrap_or(DEFAULT_INITIAL_CAP);
    let created_at = Utc::now();

    let token = Token {
        id: new_token_id(rng),
        name: draft.name.trim().to_string(),
        ticker: draft.ticker.trim().to_uppercase(),
        description: draft.description,
        image_url: placeholder_image_url(created_at.timestamp_millis()),
        creator: creator.to_string(),
        market_cap: initial_cap,
        bonding_curve_progress: 0.0,
        status: TokenStatus::BondingCurve,
        replies: 0,
        created_at,
        king_of_the_hill: false,
        socials: draft.socials.normalized(),
    };

    reprice(token, initial_cap)
}
