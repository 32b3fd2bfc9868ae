//! Simulated Trades
//!
//! Trade records shown in a token's recent-trades panel. Records are
//! illustrative: they never feed back into capitalization on their own.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::str::FromStr;

/// Default number of trades kept in a feed
pub const DEFAULT_FEED_CAPACITY: usize = 10;

/// Token amount recorded on every simulated trade
pub const ILLUSTRATIVE_TOKEN_AMOUNT: u64 = 1_000;

/// Chance that a fabricated trade is a buy
const FABRICATED_BUY_PROBABILITY: f64 = 0.6;

/// Upper bound (exclusive) for fabricated trade amounts
const FABRICATED_MAX_AMOUNT: f64 = 2.0;

/// User label for trades made from this session
pub const SELF_USER: &str = "You";

/// Trade direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl std::fmt::Display for TradeSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "BUY"),
            TradeSide::Sell => write!(f, "SELL"),
        }
    }
}

impl FromStr for TradeSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "buy" | "b" => Ok(TradeSide::Buy),
            "sell" | "s" => Ok(TradeSide::Sell),
            other => Err(format!("unknown trade side '{}', expected buy or sell", other)),
        }
    }
}

/// A single simulated trade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: String,
    #[serde(rename = "type")]
    pub side: TradeSide,
    /// Amount in the base trading currency
    pub amount: f64,
    /// Illustrative, not derived from `amount`
    pub token_amount: u64,
    pub user: String,
    pub timestamp: DateTime<Utc>,
    /// Placeholder transaction reference
    pub tx_hash: String,
}

impl Trade {
    /// Record a trade made by the local user
    pub fn user_trade<R: Rng + ?Sized>(rng: &mut R, side: TradeSide, amount: f64) -> Self {
        Self {
            id: rng.gen::<u64>().to_string(),
            side,
            amount,
            token_amount: ILLUSTRATIVE_TOKEN_AMOUNT,
            user: SELF_USER.to_string(),
            timestamp: Utc::now(),
            tx_hash: "pending".to_string(),
        }
    }
}

/// Fabricate a background trade for display
pub fn fabricate_trade<R: Rng + ?Sized>(rng: &mut R) -> Trade {
    let side = if rng.gen::<f64>() < FABRICATED_BUY_PROBABILITY {
        TradeSide::Buy
    } else {
        TradeSide::Sell
    };
    let amount = (rng.gen::<f64>() * FABRICATED_MAX_AMOUNT * 100.0).round() / 100.0;

    Trade {
        id: rng.gen::<u64>().to_string(),
        side,
        amount,
        token_amount: ILLUSTRATIVE_TOKEN_AMOUNT,
        user: format!("User{}", rng.gen_range(0..9999)),
        timestamp: Utc::now(),
        tx_hash: "tx...".to_string(),
    }
}

/// Bounded recent-trade history, most recent first
#[derive(Debug, Clone)]
pub struct TradeFeed {
    trades: VecDeque<Trade>,
    capacity: usize,
}

impl TradeFeed {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            trades: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Add a trade at the front, evicting the oldest past capacity
    pub fn push(&mut self, trade: Trade) {
        self.trades.push_front(trade);
        self.trades.truncate(self.capacity);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Trade> {
        self.trades.iter()
    }

    pub fn latest(&self) -> Option<&Trade> {
        self.trades.front()
    }

    pub fn to_vec(&self) -> Vec<Trade> {
        self.trades.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for TradeFeed {
    fn default() -> Self {
        Self::new(DEFAULT_FEED_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_trade_side_parse() {
        assert_eq!("buy".parse::<TradeSide>(), Ok(TradeSide::Buy));
        assert_eq!("SELL".parse::<TradeSide>(), Ok(TradeSide::Sell));
        assert!("hodl".parse::<TradeSide>().is_err());
    }

    #[test]
    fn test_feed_keeps_newest_first_and_capped() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut feed = TradeFeed::new(3);

        for i in 1..=5 {
            feed.push(Trade::user_trade(&mut rng, TradeSide::Buy, i as f64));
        }

        assert_eq!(feed.len(), 3);
        let amounts: Vec<f64> = feed.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![5.0, 4.0, 3.0]);
        assert_eq!(feed.latest().map(|t| t.amount), Some(5.0));
    }

    #[test]
    fn test_zero_capacity_feed_holds_one() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut feed = TradeFeed::new(0);
        feed.push(Trade::user_trade(&mut rng, TradeSide::Sell, 1.0));
        feed.push(Trade::user_trade(&mut rng, TradeSide::Sell, 2.0));
        assert_eq!(feed.capacity(), 1);
        assert_eq!(feed.len(), 1);
    }

    #[test]
    fn test_fabricated_trade_shape() {
        let mut rng = StdRng::seed_from_u64(2024);

        for _ in 0..200 {
            let trade = fabricate_trade(&mut rng);
            assert!((0.0..=2.0).contains(&trade.amount));
            // rounded to cents
            assert!(((trade.amount * 100.0).round() - trade.amount * 100.0).abs() < 1e-9);
            assert_eq!(trade.token_amount, ILLUSTRATIVE_TOKEN_AMOUNT);
            assert!(trade.user.starts_with("User"));
            assert_eq!(trade.tx_hash, "tx...");
        }
    }

    #[test]
    fn test_fabricated_trades_mix_sides() {
        let mut rng = StdRng::seed_from_u64(8);
        let buys = (0..500)
            .map(|_| fabricate_trade(&mut rng))
            .filter(|t| t.side == TradeSide::Buy)
            .count();
        assert!(buys > 200 && buys < 400, "unexpected buy count {}", buys);
    }

    #[test]
    fn test_user_trade_is_pending() {
        let mut rng = StdRng::seed_from_u64(3);
        let trade = Trade::user_trade(&mut rng, TradeSide::Buy, 0.5);
        assert_eq!(trade.user, SELF_USER);
        assert_eq!(trade.tx_hash, "pending");

        let json = serde_json::to_value(&trade).unwrap();
        assert_eq!(json["type"], "buy");
        assert_eq!(json["txHash"], "pending");
    }
}
