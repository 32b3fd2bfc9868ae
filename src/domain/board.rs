//! Launch Board Views
//!
//! Derived listings over the token collection. Nothing here is stored on
//! the tokens themselves; views are recomputed from the current snapshot.

use serde::Serialize;
use std::cmp::Ordering;

use super::token::Token;

/// King of the hill plus the remaining tokens in display order
#[derive(Debug, Clone, Default, Serialize)]
pub struct BoardView {
    pub king: Option<Token>,
    pub others: Vec<Token>,
}

fn by_market_cap_desc(a: &Token, b: &Token) -> Ordering {
    b.market_cap
        .partial_cmp(&a.market_cap)
        .unwrap_or(Ordering::Equal)
}

/// Tokens ordered by descending market cap (stable for ties)
pub fn sorted_by_market_cap(tokens: &[Token]) -> Vec<Token> {
    let mut sorted = tokens.to_vec();
    sorted.sort_by(by_market_cap_desc);
    sorted
}

/// Highest-cap token still on the curve, else the highest-cap token overall.
///
/// Ties go to the earlier token in the collection.
pub fn king_of_the_hill(tokens: &[Token]) -> Option<&Token> {
    tokens
        .iter()
        .filter(|t| !t.is_graduated())
        .min_by(|a, b| by_market_cap_desc(a, b))
        .or_else(|| tokens.iter().min_by(|a, b| by_market_cap_desc(a, b)))
}

/// Board listing: the king first, everything else by market cap
pub fn board_view(tokens: &[Token]) -> BoardView {
    let king = king_of_the_hill(tokens).cloned();
    let others = sorted_by_market_cap(tokens)
        .into_iter()
        .filter(|t| king.as_ref().map_or(true, |k| k.id != t.id))
        .collect();

    BoardView { king, others }
}
