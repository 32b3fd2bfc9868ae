//! Domain Layer - Core simulation logic for the launch board
//!
//! Pure types and functions with no I/O. All external interactions happen
//! through the ports layer.
//!
//! - `market`: bonding-curve progress, graduation, trade and drift math
//! - `token`: launched tokens and launch drafts
//! - `trade`: simulated trade records and the bounded recent-trade feed
//! - `board`: king-of-the-hill selection and display ordering
//! - `comment`: token thread posts
//! - `curve_chart`: display price curve
//! - `mock_data`: seeded mock board

pub mod market;
pub mod token;
pub mod trade;
pub mod board;
pub mod comment;
pub mod curve_chart;
pub mod mock_data;

pub use market::{
    apply_drift, apply_trade, create_token, progress_for, reprice, status_for, try_apply_trade,
    validate_trade_amount, DriftParams, MarketError, GRADUATION_CAP, IMPACT_RATE, MIN_CAP,
};
pub use token::{SocialLinks, Token, TokenDraft, TokenStatus};
pub use trade::{fabricate_trade, Trade, TradeFeed, TradeSide};
pub use board::{board_view, king_of_the_hill, sorted_by_market_cap, BoardView};
pub use comment::{Comment, CommentThread};
pub use curve_chart::{curve_points, price_at, CurvePoint};
pub use mock_data::generate_mock_tokens;
