//! CLI Command Definitions
//!
//! clap derive structs for every `curvepad` subcommand. The handlers live in
//! the binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::trade::TradeSide;

const DEFAULT_CONFIG: &str = "config/curvepad.toml";

/// Curvepad - Bonding-curve launch board simulator
#[derive(Parser, Debug)]
#[command(
    name = "curvepad",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = "Bonding-curve launch board simulator",
    long_about = "Curvepad simulates a meme-coin launch board: tokens start on a bonding \
                  curve, move with trades and random drift, and graduate once their \
                  market cap reaches the threshold. Nothing touches a real chain."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Seed a board and print it
    Board(BoardCmd),

    /// Launch a new token
    Launch(LaunchCmd),

    /// Trade a token on a freshly seeded board
    Trade(TradeCmd),

    /// Run the drift simulation for a while
    Run(RunCmd),

    /// Generate a coin idea
    Idea(IdeaCmd),

    /// Print the bonding-curve price chart
    Curve(CurveCmd),
}

/// Print the launch board
#[derive(Parser, Debug)]
pub struct BoardCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Output format (text, json)
    #[arg(short, long, value_name = "FORMAT", default_value = "text", value_parser = ["text", "json"])]
    pub format: String,
}

/// Launch a token
#[derive(Parser, Debug)]
pub struct LaunchCmd {
    /// Token name (filled from --topic when omitted)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Ticker symbol (filled from --topic when omitted)
    #[arg(short, long)]
    pub ticker: Option<String>,

    /// Launch description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Starting market cap (defaults to 500)
    #[arg(long, value_name = "USD")]
    pub market_cap: Option<f64>,

    #[arg(long, value_name = "URL")]
    pub twitter: Option<String>,

    #[arg(long, value_name = "URL")]
    pub telegram: Option<String>,

    #[arg(long, value_name = "URL")]
    pub website: Option<String>,

    /// Fill missing fields from a generated idea for this topic
    #[arg(long)]
    pub topic: Option<String>,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Output format (text, json)
    #[arg(short, long, value_name = "FORMAT", default_value = "text", value_parser = ["text", "json"])]
    pub format: String,
}

/// Trade a token
#[derive(Parser, Debug)]
pub struct TradeCmd {
    /// Token id (mock tokens are token-0, token-1, ...)
    #[arg(value_name = "TOKEN_ID")]
    pub token_id: String,

    /// buy or sell
    #[arg(value_name = "SIDE")]
    pub side: TradeSide,

    /// Amount in SOL
    #[arg(value_name = "AMOUNT", allow_negative_numbers = true)]
    pub amount: f64,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Output format (text, json)
    #[arg(short, long, value_name = "FORMAT", default_value = "text", value_parser = ["text", "json"])]
    pub format: String,
}

/// Run the drift simulation
#[derive(Parser, Debug)]
pub struct RunCmd {
    /// How long to run, in seconds
    #[arg(long, value_name = "SECS", default_value = "15")]
    pub duration: u64,

    /// Open a detail session with a trade feed on this token
    #[arg(short, long, value_name = "TOKEN_ID")]
    pub watch: Option<String>,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,
}

/// Generate a coin idea
#[derive(Parser, Debug)]
pub struct IdeaCmd {
    /// Topic (empty for a surprise)
    #[arg(value_name = "TOPIC", default_value = "")]
    pub topic: String,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,
}

/// Print the price curve
#[derive(Parser, Debug)]
pub struct CurveCmd {
    /// Also print the price at this progress percentage
    #[arg(short, long, value_name = "PERCENT")]
    pub progress: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_app_parse_board() {
        let args = vec!["curvepad", "board", "--format", "json"];
        let app = CliApp::try_parse_from(args).unwrap();

        match app.command {
            Command::Board(cmd) => {
                assert_eq!(cmd.format, "json");
                assert_eq!(cmd.config, PathBuf::from(DEFAULT_CONFIG));
            }
            _ => panic!("Expected Board command"),
        }
    }

    #[test]
    fn test_cli_app_rejects_unknown_format() {
        let args = vec!["curvepad", "board", "--format", "table"];
        assert!(CliApp::try_parse_from(args).is_err());
    }

    #[test]
    fn test_cli_app_parse_launch() {
        let args = vec![
            "curvepad", "launch", "--name", "Frog", "--ticker", "frg", "--market-cap", "1000",
            "--twitter", "https://x.com/frog",
        ];
        let app = CliApp::try_parse_from(args).unwrap();

        match app.command {
            Command::Launch(cmd) => {
                assert_eq!(cmd.name.as_deref(), Some("Frog"));
                assert_eq!(cmd.ticker.as_deref(), Some("frg"));
                assert_eq!(cmd.market_cap, Some(1000.0));
                assert_eq!(cmd.twitter.as_deref(), Some("https://x.com/frog"));
                assert!(cmd.topic.is_none());
            }
            _ => panic!("Expected Launch command"),
        }
    }

    #[test]
    fn test_cli_app_parse_trade() {
        let args = vec!["curvepad", "trade", "token-3", "sell", "2.5"];
        let app = CliApp::try_parse_from(args).unwrap();

        match app.command {
            Command::Trade(cmd) => {
                assert_eq!(cmd.token_id, "token-3");
                assert_eq!(cmd.side, TradeSide::Sell);
                assert_eq!(cmd.amount, 2.5);
            }
            _ => panic!("Expected Trade command"),
        }
    }

    #[test]
    fn test_cli_app_parse_trade_bad_side() {
        let args = vec!["curvepad", "trade", "token-3", "hodl", "1"];
        assert!(CliApp::try_parse_from(args).is_err());
    }

    #[test]
    fn test_cli_app_parse_run() {
        let args = vec!["curvepad", "-v", "run", "--duration", "5", "--watch", "token-0"];
        let app = CliApp::try_parse_from(args).unwrap();

        assert!(app.verbose);
        assert!(!app.debug);
        match app.command {
            Command::Run(cmd) => {
                assert_eq!(cmd.duration, 5);
                assert_eq!(cmd.watch.as_deref(), Some("token-0"));
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_cli_app_parse_idea_default_topic() {
        let app = CliApp::try_parse_from(vec!["curvepad", "idea"]).unwrap();
        match app.command {
            Command::Idea(cmd) => assert_eq!(cmd.topic, ""),
            _ => panic!("Expected Idea command"),
        }
    }

    #[test]
    fn test_cli_app_parse_curve() {
        let app = CliApp::try_parse_from(vec!["curvepad", "curve", "--progress", "50", "--debug"]).unwrap();
        assert!(app.debug);
        match app.command {
            Command::Curve(cmd) => assert_eq!(cmd.progress, Some(50.0)),
            _ => panic!("Expected Curve command"),
        }
    }
}
