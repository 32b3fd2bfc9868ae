//! Gemini Adapter
//!
//! Implements the `IdeaGenerator` port over Google's Gemini REST API.
//!
//! # Example
//!
//! ```rust,ignore
//! use curvepad::adapters::gemini::GeminiClient;
//! use curvepad::config::GeminiSection;
//! use curvepad::ports::coin_idea_or_fallback;
//!
//! let client = GeminiClient::from_section(&GeminiSection::default())?;
//! let outcome = coin_idea_or_fallback(&client, "a sad hamster").await;
//! println!("{} ({})", outcome.idea().name, outcome.idea().ticker);
//! ```

mod client;
mod types;

pub use client::{parse_coin_idea, GeminiClient, GeminiConfig};
