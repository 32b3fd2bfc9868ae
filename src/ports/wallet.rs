//! Wallet Port
//!
//! Optional identity provider. The connected address is only ever used as
//! a token's `creator`; no simulation math depends on it.

use async_trait::async_trait;
use rand::Rng;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Creator label used when no wallet is connected
pub const ANONYMOUS_CREATOR: &str = "Anon";

#[derive(Debug, Error, Clone, PartialEq)]
pub enum WalletError {
    #[error("No wallet provider installed")]
    NotInstalled,
    #[error("User rejected the connection request")]
    Rejected,
    #[error("Wallet is not connected")]
    NotConnected,
}

/// Wallet-style identity provider
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Connect and return the display address.
    ///
    /// With `only_if_trusted`, fail instead of prompting the user.
    async fn connect(&self, only_if_trusted: bool) -> Result<String, WalletError>;

    async fn disconnect(&self) -> Result<(), WalletError>;

    /// Currently connected address, if any
    fn address(&self) -> Option<String>;
}

/// Creator label for an optional wallet address
pub fn creator_label(address: Option<&str>) -> String {
    address
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .unwrap_or(ANONYMOUS_CREATOR)
        .to_string()
}

/// Wallet with a fixed address, standing in for an injected browser wallet
#[derive(Debug, Clone)]
pub struct StaticWallet {
    address: String,
    trusted: bool,
    connected: Arc<Mutex<bool>>,
}

impl StaticWallet {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            trusted: true,
            connected: Arc::new(Mutex::new(false)),
        }
    }

    /// Wallet with a random base58 address (for testing and offline runs)
    pub fn new_random() -> Self {
        let bytes: [u8; 32] = rand::thread_rng().gen();
        Self::new(bs58::encode(bytes).into_string())
    }

    /// Untrusted wallets refuse eager (`only_if_trusted`) connections
    pub fn untrusted(mut self) -> Self {
        self.trusted = false;
        self
    }

    fn set_connected(&self, value: bool) {
        if let Ok(mut connected) = self.connected.lock() {
            *connected = value;
        }
    }

    fn is_connected(&self) -> bool {
        self.connected.lock().map(|c| *c).unwrap_or(false)
    }
}

#[async_trait]
impl WalletProvider for StaticWallet {
    async fn connect(&self, only_if_trusted: bool) -> Result<String, WalletError> {
        if only_if_trusted && !self.trusted {
            return Err(WalletError::Rejected);
        }
        self.set_connected(true);
        Ok(self.address.clone())
    }

    async fn disconnect(&self) -> Result<(), WalletError> {
        if !self.is_connected() {
            return Err(WalletError::NotConnected);
        }
        self.set_connected(false);
        Ok(())
    }

    fn address(&self) -> Option<String> {
        self.is_connected().then(|| self.address.clone())
    }
}

/// No wallet installed at all
#[derive(Debug, Clone, Default)]
pub struct NoWallet;

#[async_trait]
impl WalletProvider for NoWallet {
    async fn connect(&self, _only_if_trusted: bool) -> Result<String, WalletError> {
        Err(WalletError::NotInstalled)
    }

    async fn disconnect(&self) -> Result<(), WalletError> {
        Err(WalletError::NotConnected)
    }

    fn address(&self) -> Option<String> {
        None
    }
}
