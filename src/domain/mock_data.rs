//! Mock Board Generator
//!
//! Seeds the launch board with a fixed king token and a handful of random
//! meme coins. All market state goes through `reprice` like any other change.

use chrono::{Duration, Utc};
use rand::Rng;

use super::market::reprice;
use super::token::{placeholder_image_url, SocialLinks, Token, TokenStatus};

/// Tokens on a freshly seeded board
pub const DEFAULT_MOCK_TOKEN_COUNT: usize = 12;

/// Market cap of the seeded king token
pub const KING_MARKET_CAP: f64 = 62_000.0;

const KING_DESCRIPTION: &str =
    "The original king of the hill. Meow is always watching. Don't fade the cat.";
const FILLER_DESCRIPTION: &str =
    "Just another degen play. Will it moon? Probably not. But you're here anyway.";

/// Generate `count` mock tokens in insertion order
pub fn generate_mock_tokens<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Token> {
    (0..count).map(|i| mock_token(i, rng)).collect()
}

fn mock_token<R: Rng + ?Sized>(index: usize, rng: &mut R) -> Token {
    let is_king = index == 0;
    let market_cap = if is_king {
        KING_MARKET_CAP
    } else {
        rng.gen_range(1_000..16_000) as f64
    };

    let socials = SocialLinks {
        twitter: rng.gen_bool(0.5).then(|| "https://twitter.com".to_string()),
        telegram: rng.gen_bool(0.5).then(|| "https://t.me".to_string()),
        website: None,
    };

    let token = Token {
        id: format!("token-{}", index),
        name: if is_king {
            "Meow King".to_string()
        } else {
            format!("Meme Coin {}", index)
        },
        ticker: if is_king {
            "MEOW".to_string()
        } else {
            format!("MEME{}", index)
        },
        description: if is_king { KING_DESCRIPTION } else { FILLER_DESCRIPTION }.to_string(),
        image_url: placeholder_image_url(index + 123),
        creator: format!("Dev_{}", rng.gen_range(0..1000)),
        market_cap,
        bonding_curve_progress: 0.0,
        status: TokenStatus::BondingCurve,
        replies: rng.gen_range(0..100),
        created_at: Utc::now() - Duration::milliseconds(rng.gen_range(0..10_000_000)),
        king_of_the_hill: is_king,
        socials,
    };

    reprice(token, market_cap)
}
