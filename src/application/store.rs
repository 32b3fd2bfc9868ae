//! Token Store
//!
//! The single owned token collection behind the launch board. Views get
//! snapshots and a cloned handle; every mutation builds a new collection
//! from the old one and swaps it in under the write lock, so readers never
//! observe a partially updated board.

use std::sync::Arc;
use rand::Rng;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::domain::board::{board_view, king_of_the_hill, BoardView};
use crate::domain::market::{
    apply_drift, create_token, try_apply_trade, validate_trade_amount, DriftParams,
};
use crate::domain::token::{Token, TokenDraft};
use crate::domain::trade::TradeSide;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    #[error("Invalid trade amount: {0}")]
    InvalidAmount(f64),
    #[error("Token not found: {0}")]
    TokenNotFound(String),
}

/// Shared handle to the token collection
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    tokens: Arc<RwLock<Vec<Token>>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with an initial collection
    pub fn with_tokens(tokens: Vec<Token>) -> Self {
        Self {
            tokens: Arc::new(RwLock::new(tokens)),
        }
    }

    /// Read-only copy of the collection in insertion order
    pub async fn snapshot(&self) -> Vec<Token> {
        self.tokens.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<Token> {
        self.tokens.read().await.iter().find(|t| t.id == id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tokens.read().await.is_empty()
    }

    /// Replace the whole collection
    pub async fn replace_all(&self, tokens: Vec<Token>) {
        *self.tokens.write().await = tokens;
    }

    /// Add a token at the front of the board
    pub async fn insert(&self, token: Token) {
        let mut guard = self.tokens.write().await;
        let mut next = Vec::with_capacity(guard.len() + 1);
        next.push(token);
        next.extend(guard.iter().cloned());
        *guard = next;
    }

    /// Launch a token from a draft and put it on the board
    pub async fn create_token<R: Rng + ?Sized>(
        &self,
        draft: TokenDraft,
        creator: &str,
        rng: &mut R,
    ) -> Token {
        let token = create_token(draft, creator, rng);
        info!(
            "Launched {} ({}) by {} at ${:.0} market cap",
            token.name, token.ticker, token.creator, token.market_cap
        );
        self.insert(token.clone()).await;
        token
    }

    /// Apply a trade to one token and return its updated state
    pub async fn trade(&self, id: &str, side: TradeSide, amount: f64) -> Result<Token, StoreError> {
        let amount = validate_trade_amount(amount).map_err(|_| StoreError::InvalidAmount(amount))?;

        let mut guard = self.tokens.write().await;
        let current = guard
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| StoreError::TokenNotFound(id.to_string()))?;

        // rejected before the collection is touched
        let traded =
            try_apply_trade(current, side, amount).map_err(|_| StoreError::InvalidAmount(amount))?;

        let next: Vec<Token> = guard
            .iter()
            .map(|t| if t.id == id { traded.clone() } else { t.clone() })
            .collect();
        *guard = next;

        Ok(traded)
    }

    /// Apply one drift tick to every token; returns how many moved
    pub async fn drift_sweep<R: Rng + ?Sized>(&self, rng: &mut R, params: &DriftParams) -> usize {
        let mut guard = self.tokens.write().await;
        let mut moved = 0;

        let next: Vec<Token> = guard
            .iter()
            .map(|t| {
                let drifted = apply_drift(t.clone(), &mut *rng, params);
                if drifted.market_cap != t.market_cap {
                    moved += 1;
                }
                drifted
            })
            .collect();
        *guard = next;

        debug!("Drift tick moved {} token(s)", moved);
        moved
    }

    pub async fn king_of_the_hill(&self) -> Option<Token> {
        king_of_the_hill(&self.tokens.read().await).cloned()
    }

    pub async fn board_view(&self) -> BoardView {
        board_view(&self.tokens.read().await)
    }
}
