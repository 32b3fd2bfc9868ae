//! Ports Layer - Trait definitions for external collaborators
//!
//! This module defines the interfaces (ports) that adapters must implement.
//! Following hexagonal architecture, these traits abstract:
//! - Coin idea and roast text generation
//! - Wallet-style creator identity

pub mod idea_generator;
pub mod wallet;
pub mod mocks;

// Re-export main traits and types
pub use idea_generator::{
    coin_idea_or_fallback, roast_or_fallback, CoinIdea, IdeaError, IdeaGenerator, IdeaOutcome,
    OfflineIdeaGenerator,
};
pub use wallet::{creator_label, NoWallet, StaticWallet, WalletError, WalletProvider};
