//! Launch Board Tokens
//!
//! A token on the launch board: descriptive fields plus the market state
//! that the simulation keeps in sync with its capitalization.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Where a token is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenStatus {
    /// Still trading on the bonding curve
    BondingCurve,
    /// Graduated - liquidity moved to Raydium (terminal)
    Raydium,
}

impl TokenStatus {
    /// Returns true once the token has left the curve
    pub fn is_graduated(&self) -> bool {
        matches!(self, TokenStatus::Raydium)
    }
}

impl std::fmt::Display for TokenStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenStatus::BondingCurve => write!(f, "bonding_curve"),
            TokenStatus::Raydium => write!(f, "raydium"),
        }
    }
}

/// Optional social links shown on the token page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl SocialLinks {
    /// Drop blank entries so an empty form field never becomes a link
    pub fn normalized(self) -> Self {
        fn keep(link: Option<String>) -> Option<String> {
            link.map(|l| l.trim().to_string()).filter(|l| !l.is_empty())
        }

        Self {
            twitter: keep(self.twitter),
            telegram: keep(self.telegram),
            website: keep(self.website),
        }
    }

    pub fn has_any(&self) -> bool {
        self.twitter.is_some() || self.telegram.is_some() || self.website.is_some()
    }
}

/// A launched token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// Opaque unique identifier
    pub id: String,
    pub name: String,
    pub ticker: String,
    pub description: String,
    pub image_url: String,
    /// Creator display address ("Anon" when no wallet was connected)
    pub creator: String,
    /// Capitalization in an abstract fiat-equivalent unit
    pub market_cap: f64,
    /// Bonding curve completion, always within [0, 100]
    pub bonding_curve_progress: f64,
    pub status: TokenStatus,
    pub replies: u32,
    pub created_at: DateTime<Utc>,
    /// Display flag for the featured token
    pub king_of_the_hill: bool,
    #[serde(flatten)]
    pub socials: SocialLinks,
}

impl Token {
    /// Returns true once the token has graduated to Raydium
    pub fn is_graduated(&self) -> bool {
        self.status.is_graduated()
    }

    /// Short creator label for compact listings
    pub fn creator_short(&self) -> &str {
        match self.creator.char_indices().nth(6) {
            Some((idx, _)) => &self.creator[..idx],
            None => &self.creator,
        }
    }
}

/// User-supplied fields from the launch form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenDraft {
    pub name: String,
    pub ticker: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten, default)]
    pub socials: SocialLinks,
    /// Starting capitalization (defaults to 500 when absent)
    #[serde(default)]
    pub market_cap: Option<f64>,
}

impl TokenDraft {
    pub fn new(name: impl Into<String>, ticker: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ticker: ticker.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_market_cap(mut self, market_cap: f64) -> Self {
        self.market_cap = Some(market_cap);
        self
    }

    pub fn with_socials(mut self, socials: SocialLinks) -> Self {
        self.socials = socials;
        self
    }
}

/// Generate a fresh token identifier
pub fn new_token_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    let bytes: [u8; 16] = rng.gen();
    bs58::encode(bytes).into_string()
}

/// Placeholder image reference for a seed
pub fn placeholder_image_url(seed: impl std::fmt::Display) -> String {
    format!("https://picsum.photos/seed/{}/200/200", seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_token() -> Token {
        Token {
            id: "token-0".to_string(),
            name: "Meow King".to_string(),
            ticker: "MEOW".to_string(),
            description: "Meow is always watching.".to_string(),
            image_url: placeholder_image_url(123),
            creator: "Dev_417".to_string(),
            market_cap: 62_000.0,
            bonding_curve_progress: 89.855,
            status: TokenStatus::BondingCurve,
            replies: 12,
            created_at: Utc::now(),
            king_of_the_hill: true,
            socials: SocialLinks {
                twitter: Some("https://twitter.com".to_string()),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&TokenStatus::BondingCurve).unwrap();
        assert_eq!(json, "\"bonding_curve\"");
        let json = serde_json::to_string(&TokenStatus::Raydium).unwrap();
        assert_eq!(json, "\"raydium\"");
        assert_eq!(TokenStatus::Raydium.to_string(), "raydium");
    }

    #[test]
    fn test_token_json_uses_camel_case_fields() {
        let value = serde_json::to_value(sample_token()).unwrap();
        assert!(value.get("marketCap").is_some());
        assert!(value.get("bondingCurveProgress").is_some());
        assert!(value.get("kingOfTheHill").is_some());
        assert_eq!(value["twitter"], "https://twitter.com");
        // absent socials are omitted entirely
        assert!(value.get("telegram").is_none());
    }

    #[test]
    fn test_creator_short() {
        let mut token = sample_token();
        assert_eq!(token.creator_short(), "Dev_41");
        token.creator = "Anon".to_string();
        assert_eq!(token.creator_short(), "Anon");
    }

    #[test]
    fn test_socials_normalized_drops_blanks() {
        let socials = SocialLinks {
            twitter: Some("  ".to_string()),
            telegram: Some(" https://t.me/x ".to_string()),
            website: None,
        }
        .normalized();

        assert!(socials.twitter.is_none());
        assert_eq!(socials.telegram.as_deref(), Some("https://t.me/x"));
        assert!(socials.has_any());
    }

    #[test]
    fn test_new_token_ids_are_distinct() {
        let mut rng = StdRng::seed_from_u64(7);
        let a = new_token_id(&mut rng);
        let b = new_token_id(&mut rng);
        assert_ne!(a, b);
        assert!(!a.is_empty());
    }
}
