//! Token Detail Session
//!
//! State behind a token's detail page: the canonical token (re-read from the
//! store after every change), a local recent-trades feed, the comment thread
//! and the synthetic trade-feed ticker. Dropping the session stops the ticker.

use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::domain::comment::{Comment, CommentThread};
use crate::domain::market::validate_trade_amount;
use crate::domain::token::{Token, TokenStatus};
use crate::domain::trade::{fabricate_trade, Trade, TradeFeed, TradeSide};
use super::store::{StoreError, TokenStore};
use super::ticker::{spawn_periodic, PeriodicTask, TickError, TickerHandle};

/// Fabricates display-only trades for one token
struct TradeFeedTask {
    name: String,
    store: TokenStore,
    token_id: String,
    feed: Arc<RwLock<TradeFeed>>,
    rng: StdRng,
    probability: f64,
    /// Status last seen in the store; used when the token goes missing
    last_status: TokenStatus,
}

#[async_trait]
impl PeriodicTask for TradeFeedTask {
    fn name(&self) -> &str {
        &self.name
    }

    async fn tick(&mut self) -> Result<(), TickError> {
        if let Some(token) = self.store.get(&self.token_id).await {
            self.last_status = token.status;
        }
        if self.last_status.is_graduated() {
            return Ok(());
        }

        if self.rng.gen::<f64>() < self.probability {
            let trade = fabricate_trade(&mut self.rng);
            debug!("{} {} {:.2} on {}", trade.user, trade.side, trade.amount, self.token_id);
            self.feed.write().await.push(trade);
        }
        Ok(())
    }
}

/// Detail view over one token
pub struct TokenDetailSession {
    token_id: String,
    store: TokenStore,
    last_known: Token,
    feed: Arc<RwLock<TradeFeed>>,
    comments: CommentThread,
    rng: StdRng,
    feed_ticker: Option<TickerHandle>,
}

impl TokenDetailSession {
    /// Open a session on `token`, which must come from `store`
    pub fn new(store: TokenStore, token: Token, feed_capacity: usize, seed: u64) -> Self {
        Self {
            token_id: token.id.clone(),
            store,
            last_known: token,
            feed: Arc::new(RwLock::new(TradeFeed::new(feed_capacity))),
            comments: CommentThread::seeded(),
            rng: StdRng::seed_from_u64(seed),
            feed_ticker: None,
        }
    }

    pub fn token_id(&self) -> &str {
        &self.token_id
    }

    /// Canonical token from the store, or the last-known copy if it vanished
    pub async fn current(&mut self) -> Token {
        match self.store.get(&self.token_id).await {
            Some(token) => {
                self.last_known = token.clone();
                token
            }
            None => {
                debug!("Token {} missing from store, showing last-known copy", self.token_id);
                self.last_known.clone()
            }
        }
    }

    /// Last copy seen, without touching the store
    pub fn last_known(&self) -> &Token {
        &self.last_known
    }

    /// Start fabricating background trades every `period`
    pub fn start_trade_feed(&mut self, period: Duration, probability: f64) {
        let task = TradeFeedTask {
            name: format!("trade-feed:{}", self.token_id),
            store: self.store.clone(),
            token_id: self.token_id.clone(),
            feed: Arc::clone(&self.feed),
            rng: StdRng::seed_from_u64(self.rng.gen()),
            probability,
            last_status: self.last_known.status,
        };
        // replacing an old handle drops (and aborts) it
        self.feed_ticker = Some(spawn_periodic(task, period));
    }

    pub fn is_feed_running(&self) -> bool {
        self.feed_ticker.as_ref().map_or(false, |t| t.is_running())
    }

    /// Trade from this view. Invalid amounts are rejected with no state change.
    pub async fn trade(&mut self, side: TradeSide, amount: f64) -> Result<Token, StoreError> {
        let amount = validate_trade_amount(amount).map_err(|_| StoreError::InvalidAmount(amount))?;

        let token = self.store.trade(&self.token_id, side, amount).await?;
        self.last_known = token.clone();

        let trade = Trade::user_trade(&mut self.rng, side, amount);
        self.feed.write().await.push(trade);

        info!(
            "{} {} {:.2} -> ${:.0} ({:.1}% of curve)",
            side, token.ticker, amount, token.market_cap, token.bonding_curve_progress
        );
        Ok(token)
    }

    /// Recent trades, most recent first
    pub async fn recent_trades(&self) -> Vec<Trade> {
        self.feed.read().await.to_vec()
    }

    pub fn comments(&self) -> &[Comment] {
        self.comments.comments()
    }

    pub fn post_comment(&mut self, user: &str, text: &str) -> Option<Comment> {
        self.comments.post(user, text).cloned()
    }

    /// Tear down the session, waiting for the feed ticker to exit
    pub async fn close(mut self) {
        if let Some(ticker) = self.feed_ticker.take() {
            ticker.stop().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mock_data::generate_mock_tokens;

    async fn open(id: &str) -> (TokenStore, TokenDetailSession) {
        let mut rng = StdRng::seed_from_u64(10);
        let store = TokenStore::with_tokens(generate_mock_tokens(3, &mut rng));
        let token = store.get(id).await.unwrap();
        let session = TokenDetailSession::new(store.clone(), token, 10, 99);
        (store, session)
    }

    #[tokio::test]
    async fn test_trade_refreshes_canonical_copy() {
        let (store, mut session) = open("token-1").await;

        let token = session.trade(TradeSide::Buy, 1.0).await.unwrap();
        assert_eq!(store.get("token-1").await, Some(token.clone()));
        assert_eq!(session.current().await, token);

        let trades = session.recent_trades().await;
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].user, "You");
        assert_eq!(trades[0].side, TradeSide::Buy);
    }

    #[tokio::test]
    async fn test_invalid_trade_is_ignored() {
        let (store, mut session) = open("token-1").await;
        let before = store.snapshot().await;

        assert!(session.trade(TradeSide::Buy, 0.0).await.is_err());
        assert!(session.trade(TradeSide::Sell, -3.0).await.is_err());

        assert_eq!(store.snapshot().await, before);
        assert!(session.recent_trades().await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_token_falls_back_to_last_known() {
        let (store, mut session) = open("token-2").await;
        let seen = session.current().await;

        store.replace_all(Vec::new()).await;
        assert_eq!(session.current().await, seen);
        assert!(matches!(
            session.trade(TradeSide::Buy, 1.0).await,
            Err(StoreError::TokenNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_sees_changes_made_elsewhere() {
        let (store, mut session) = open("token-0").await;
        store.trade("token-0", TradeSide::Buy, 50.0).await.unwrap();

        let token = session.current().await;
        assert_eq!(token.status, TokenStatus::Raydium);
        assert_eq!(session.last_known().status, TokenStatus::Raydium);
    }

    #[tokio::test(start_paused = true)]
    async fn test_trade_feed_fills_and_stays_capped() {
        let (_store, mut session) = open("token-1").await;
        session.start_trade_feed(Duration::from_secs(2), 1.0);
        assert!(session.is_feed_running());

        tokio::time::sleep(Duration::from_secs(41)).await;
        let trades = session.recent_trades().await;
        assert_eq!(trades.len(), 10);
        assert!(trades.iter().all(|t| t.tx_hash == "tx..."));

        session.close().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_trade_feed_pauses_after_graduation() {
        let (store, mut session) = open("token-0").await;
        store.trade("token-0", TradeSide::Buy, 50.0).await.unwrap();

        session.start_trade_feed(Duration::from_secs(2), 1.0);
        tokio::time::sleep(Duration::from_secs(11)).await;
        assert!(session.recent_trades().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_trade_feed_stays_paused_when_graduated_token_vanishes() {
        let (store, mut session) = open("token-0").await;
        store.trade("token-0", TradeSide::Buy, 50.0).await.unwrap();
        assert!(session.current().await.is_graduated());

        session.start_trade_feed(Duration::from_secs(2), 1.0);
        tokio::time::sleep(Duration::from_secs(3)).await;
        store.replace_all(Vec::new()).await;
        tokio::time::sleep(Duration::from_secs(20)).await;

        assert!(session.recent_trades().await.is_empty());
        assert_eq!(session.current().await.status, TokenStatus::Raydium);
    }

    #[tokio::test(start_paused = true)]
    async fn test_trade_feed_never_touches_market_cap() {
        let (store, mut session) = open("token-2").await;
        let before = store.snapshot().await;

        session.start_trade_feed(Duration::from_secs(2), 1.0);
        tokio::time::sleep(Duration::from_secs(21)).await;

        assert!(!session.recent_trades().await.is_empty());
        assert_eq!(store.snapshot().await, before);
    }

    #[test]
    fn test_comments() {
        let store = TokenStore::new();
        let mut rng = StdRng::seed_from_u64(1);
        let token = generate_mock_tokens(1, &mut rng).remove(0);
        let mut session = TokenDetailSession::new(store, token, 5, 1);

        assert_eq!(session.comments().len(), 3);
        assert!(session.post_comment("anon", "gm").is_some());
        assert!(session.post_comment("anon", "").is_none());
        assert_eq!(session.comments().len(), 4);
    }
}
