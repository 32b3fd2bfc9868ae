//! Curvepad - Bonding-curve launch board simulator
//!
//! Simulates a meme-coin launch board: tokens start on a bonding curve, move
//! with user trades and random drift, and graduate once their market cap
//! reaches the threshold. No chain, no real money.
//!
//! # Modules
//!
//! - `domain`: Core simulation logic (Token, market math, Trade feed, board ordering)
//! - `ports`: Trait abstractions (IdeaGenerator, WalletProvider)
//! - `adapters`: External implementations (Gemini, CLI)
//! - `config`: Configuration loading and validation
//! - `application`: Token store, tickers, detail sessions and the Launchpad

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod config;
pub mod application;
