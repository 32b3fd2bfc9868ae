//! Launchpad Coordinator
//!
//! Owns the token store, the collection-wide drift ticker and the external
//! collaborators (idea generator, wallet). Everything the CLI does goes
//! through here.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::config::Config;
use crate::domain::market::DriftParams;
use crate::domain::mock_data::generate_mock_tokens;
use crate::domain::token::{Token, TokenDraft};
use crate::domain::trade::TradeSide;
use crate::ports::idea_generator::{coin_idea_or_fallback, roast_or_fallback, IdeaGenerator, IdeaOutcome};
use crate::ports::wallet::{creator_label, WalletError, WalletProvider};
use super::session::TokenDetailSession;
use super::store::{StoreError, TokenStore};
use super::ticker::{spawn_periodic, PeriodicTask, TickError, TickerHandle};

/// RNG from a fixed seed, or from entropy when none is configured
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

struct DriftTask {
    store: TokenStore,
    rng: StdRng,
    params: DriftParams,
}

#[async_trait]
impl PeriodicTask for DriftTask {
    fn name(&self) -> &str {
        "drift"
    }

    async fn tick(&mut self) -> Result<(), TickError> {
        self.store.drift_sweep(&mut self.rng, &self.params).await;
        Ok(())
    }
}

/// Top-level simulation coordinator
pub struct Launchpad {
    config: Config,
    store: TokenStore,
    ideas: Arc<dyn IdeaGenerator>,
    wallet: Arc<dyn WalletProvider>,
    rng: StdRng,
    drift: Option<TickerHandle>,
}

impl Launchpad {
    pub fn new(
        config: Config,
        ideas: Arc<dyn IdeaGenerator>,
        wallet: Arc<dyn WalletProvider>,
    ) -> Self {
        let rng = seeded_rng(config.simulation.seed);
        Self {
            config,
            store: TokenStore::new(),
            ideas,
            wallet,
            rng,
            drift: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Shared handle to the token store
    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    /// Replace the board with `count` mock tokens
    pub async fn seed_mock_board(&mut self, count: usize) {
        let tokens = generate_mock_tokens(count, &mut self.rng);
        info!("Seeded board with {} mock token(s)", tokens.len());
        self.store.replace_all(tokens).await;
    }

    /// Connect the wallet. `eager` connects silently, only if already trusted.
    pub async fn connect_wallet(&self, eager: bool) -> Result<String, WalletError> {
        match self.wallet.connect(eager).await {
            Ok(address) => {
                info!("Wallet connected: {}", address);
                Ok(address)
            }
            Err(e) => {
                if eager {
                    info!("Eager wallet connect skipped: {}", e);
                } else {
                    warn!("Wallet connect failed: {}", e);
                }
                Err(e)
            }
        }
    }

    pub async fn disconnect_wallet(&self) -> Result<(), WalletError> {
        self.wallet.disconnect().await?;
        info!("Wallet disconnected");
        Ok(())
    }

    /// Connected address, or "Anon"
    pub fn creator(&self) -> String {
        creator_label(self.wallet.address().as_deref())
    }

    /// Launch a token from the form and put it at the front of the board
    pub async fn launch(&mut self, draft: TokenDraft) -> Token {
        let creator = self.creator();
        self.store.create_token(draft, &creator, &mut self.rng).await
    }

    /// Coin idea for a topic; never fails
    pub async fn suggest_idea(&self, topic: &str) -> IdeaOutcome {
        coin_idea_or_fallback(self.ideas.as_ref(), topic).await
    }

    /// Launch draft with any missing name, ticker or description filled from
    /// a generated idea for `topic`
    pub async fn draft_from_idea(
        &self,
        name: Option<String>,
        ticker: Option<String>,
        description: Option<String>,
        topic: &str,
    ) -> (TokenDraft, IdeaOutcome) {
        let outcome = self.suggest_idea(topic).await;
        let idea = outcome.idea();

        let draft = TokenDraft::new(
            name.unwrap_or_else(|| idea.name.clone()),
            ticker.unwrap_or_else(|| idea.ticker.clone()),
        )
        .with_description(description.unwrap_or_else(|| idea.description.clone()));

        (draft, outcome)
    }

    /// Roast for the current king of the hill, if there is one
    pub async fn roast_king(&self) -> Option<String> {
        let king = self.store.king_of_the_hill().await?;
        Some(roast_or_fallback(self.ideas.as_ref(), &king.name).await)
    }

    pub async fn trade(&self, id: &str, side: TradeSide, amount: f64) -> Result<Token, StoreError> {
        self.store.trade(id, side, amount).await
    }

    /// Open a detail session with its trade feed running
    pub async fn open_detail(&mut self, id: &str) -> Option<TokenDetailSession> {
        let token = self.store.get(id).await?;
        let sim = &self.config.simulation;

        let mut session =
            TokenDetailSession::new(self.store.clone(), token, sim.recent_trades_limit, self.rng.gen());
        session.start_trade_feed(sim.feed_interval(), sim.feed_probability);
        Some(session)
    }

    /// Start the drift ticker (no-op if already running)
    pub fn start_drift(&mut self) {
        if self.is_drifting() {
            return;
        }

        let sim = &self.config.simulation;
        let task = DriftTask {
            store: self.store.clone(),
            rng: StdRng::seed_from_u64(self.rng.gen()),
            params: sim.drift_params(),
        };
        info!("Starting drift every {:?}", sim.drift_interval());
        self.drift = Some(spawn_periodic(task, sim.drift_interval()));
    }

    pub async fn stop_drift(&mut self) {
        if let Some(ticker) = self.drift.take() {
            ticker.stop().await;
            info!("Drift stopped");
        }
    }

    pub fn is_drifting(&self) -> bool {
        self.drift.as_ref().map_or(false, |t| t.is_running())
    }

    /// Drift until `shutdown` resolves
    pub async fn run_until<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        self.start_drift();
        shutdown.await;
        self.stop_drift().await;
    }

    /// Drift for `duration`, or until ctrl-c
    pub async fn run_for(&mut self, duration: Duration) {
        self.run_until(async {
            tokio::select! {
                _ = tokio::time::sleep(duration) => {}
                _ = tokio::signal::ctrl_c() => {
                    info!("Received ctrl-c, stopping");
                }
            }
        })
        .await;
    }
}
