//! Curvepad - Bonding-curve launch board simulator
//!
//! Command-line front end over the simulation library.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use anyhow::{bail, Context, Result};
use tracing_subscriber::{fmt, EnvFilter};

use curvepad::adapters::cli::{self, BoardCmd, Command, CurveCmd, IdeaCmd, LaunchCmd, RunCmd, TradeCmd};
use curvepad::adapters::gemini::GeminiClient;
use curvepad::application::Launchpad;
use curvepad::config::{load_config_or_default, Config};
use curvepad::domain::board::BoardView;
use curvepad::domain::curve_chart::{curve_points, price_at, GRADUATION_LABEL};
use curvepad::domain::token::{SocialLinks, Token, TokenDraft};
use curvepad::domain::trade::Trade;
use curvepad::ports::{IdeaGenerator, IdeaOutcome, OfflineIdeaGenerator, StaticWallet, WalletProvider};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (API keys go here, not in the config file)
    dotenvy::dotenv().ok();

    let app = cli::init();

    let config = match config_path(&app.command) {
        Some(path) => load_config_or_default(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };
    init_logging(app.verbose, app.debug, &config.logging.level)?;

    match app.command {
        Command::Board(cmd) => board_command(cmd, config).await,
        Command::Launch(cmd) => launch_command(cmd, config).await,
        Command::Trade(cmd) => trade_command(cmd, config).await,
        Command::Run(cmd) => run_command(cmd, config).await,
        Command::Idea(cmd) => idea_command(cmd, config).await,
        Command::Curve(cmd) => curve_command(cmd),
    }
}

fn config_path(command: &Command) -> Option<&Path> {
    match command {
        Command::Board(cmd) => Some(cmd.config.as_path()),
        Command::Launch(cmd) => Some(cmd.config.as_path()),
        Command::Trade(cmd) => Some(cmd.config.as_path()),
        Command::Run(cmd) => Some(cmd.config.as_path()),
        Command::Idea(cmd) => Some(cmd.config.as_path()),
        Command::Curve(_) => None,
    }
}

fn init_logging(verbose: bool, debug: bool, level: &str) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };

    fmt().with_env_filter(filter).with_target(false).init();
    Ok(())
}

fn idea_generator(config: &Config) -> Arc<dyn IdeaGenerator> {
    match GeminiClient::from_section(&config.gemini) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::info!("Idea generator offline: {}", e);
            Arc::new(OfflineIdeaGenerator)
        }
    }
}

fn wallet(config: &Config) -> Arc<dyn WalletProvider> {
    let wallet = match &config.wallet.address {
        Some(address) => StaticWallet::new(address.clone()),
        None => StaticWallet::new_random(),
    };

    if config.wallet.trusted {
        Arc::new(wallet)
    } else {
        Arc::new(wallet.untrusted())
    }
}

/// Launchpad with a seeded mock board and an eager wallet connect attempt
async fn build_launchpad(config: Config) -> Launchpad {
    let ideas = idea_generator(&config);
    let wallet = wallet(&config);
    let count = config.simulation.mock_token_count;

    let mut launchpad = Launchpad::new(config, ideas, wallet);
    launchpad.seed_mock_board(count).await;
    // an untrusted wallet just stays disconnected
    let _ = launchpad.connect_wallet(true).await;
    launchpad
}

async fn board_command(cmd: BoardCmd, config: Config) -> Result<()> {
    let launchpad = build_launchpad(config).await;
    let view = launchpad.store().board_view().await;

    match cmd.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&view)?),
        _ => {
            print_board(&view);
            if let Some(roast) = launchpad.roast_king().await {
                println!("\n  \"{}\"", roast);
            }
        }
    }
    Ok(())
}

async fn launch_command(cmd: LaunchCmd, config: Config) -> Result<()> {
    let mut launchpad = build_launchpad(config).await;

    let mut draft = match cmd.topic.as_deref() {
        Some(topic) => {
            let (draft, outcome) = launchpad
                .draft_from_idea(cmd.name, cmd.ticker, cmd.description, topic)
                .await;
            if let IdeaOutcome::Fallback { reason, .. } = &outcome {
                println!("Idea generator unavailable ({}), using fallback idea", reason);
            }
            draft
        }
        None => {
            let (Some(name), Some(ticker)) = (cmd.name, cmd.ticker) else {
                bail!("--name and --ticker are required unless --topic is given");
            };
            TokenDraft::new(name, ticker).with_description(cmd.description.unwrap_or_default())
        }
    };

    draft = draft.with_socials(SocialLinks {
        twitter: cmd.twitter,
        telegram: cmd.telegram,
        website: cmd.website,
    });
    if let Some(cap) = cmd.market_cap {
        draft = draft.with_market_cap(cap);
    }

    let token = launchpad.launch(draft).await;

    match cmd.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&token)?),
        _ => {
            println!("Launched!");
            print_token(&token);
        }
    }
    Ok(())
}

async fn trade_command(cmd: TradeCmd, config: Config) -> Result<()> {
    let launchpad = build_launchpad(config).await;

    let token = launchpad
        .trade(&cmd.token_id, cmd.side, cmd.amount)
        .await
        .with_context(|| format!("Trade {} {} on {} failed", cmd.side, cmd.amount, cmd.token_id))?;

    match cmd.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&token)?),
        _ => {
            println!("{} {:.2} SOL", cmd.side, cmd.amount);
            print_token(&token);
        }
    }
    Ok(())
}

async fn run_command(cmd: RunCmd, config: Config) -> Result<()> {
    let mut launchpad = build_launchpad(config).await;

    let session = match cmd.watch.as_deref() {
        Some(id) => Some(
            launchpad
                .open_detail(id)
                .await
                .with_context(|| format!("No token with id {}", id))?,
        ),
        None => None,
    };

    tracing::info!("Running simulation for {}s", cmd.duration);
    launchpad.run_for(Duration::from_secs(cmd.duration)).await;

    if let Some(mut session) = session {
        let token = session.current().await;
        println!("Watching {} ({})", token.name, token.ticker);
        print_token(&token);
        println!("\nRecent trades:");
        for trade in session.recent_trades().await {
            print_trade(&trade);
        }
        println!();
        session.close().await;
    }

    print_board(&launchpad.store().board_view().await);
    Ok(())
}

async fn idea_command(cmd: IdeaCmd, config: Config) -> Result<()> {
    let ideas = idea_generator(&config);
    let launchpad = Launchpad::new(config, ideas, Arc::new(StaticWallet::new_random()));

    let outcome = launchpad.suggest_idea(&cmd.topic).await;
    let idea = outcome.idea();

    println!("{} (${})", idea.name, idea.ticker);
    println!("  {}", idea.description);
    match &outcome {
        IdeaOutcome::Generated(_) => println!("  [generated]"),
        IdeaOutcome::Fallback { reason, .. } => println!("  [fallback: {}]", reason),
    }
    Ok(())
}

fn curve_command(cmd: CurveCmd) -> Result<()> {
    println!("{:>8}  {:>14}", "PROGRESS", "PRICE (SOL)");
    for point in curve_points() {
        println!("{:>7.0}%  {:>14.10}", point.progress, point.price);
    }
    println!("{:>8}  {}", "100%", GRADUATION_LABEL);

    if let Some(progress) = cmd.progress {
        println!("\nPrice at {:.1}%: {:.10} SOL", progress, price_at(progress));
    }
    Ok(())
}

fn print_board(view: &BoardView) {
    match &view.king {
        Some(king) => {
            println!("KING OF THE HILL");
            print_token(king);
        }
        None => println!("No tokens on the board"),
    }

    if !view.others.is_empty() {
        println!("\n{:<10} {:<18} {:<8} {:>12} {:>7}  {}", "ID", "NAME", "TICKER", "MARKET CAP", "CURVE", "STATUS");
        for token in &view.others {
            println!(
                "{:<10} {:<18} {:<8} {:>12.0} {:>6.1}%  {}",
                token.id, token.name, token.ticker, token.market_cap, token.bonding_curve_progress, token.status
            );
        }
    }
}

fn print_token(token: &Token) {
    println!("  {} (${})  id={}", token.name, token.ticker, token.id);
    println!("  Created by: {}  Replies: {}", token.creator_short(), token.replies);
    println!("  Market cap: ${:.0}", token.market_cap);
    println!("  Bonding curve: {:.1}%  Status: {}", token.bonding_curve_progress, token.status);
    if !token.description.is_empty() {
        println!("  {}", token.description);
    }
}

fn print_trade(trade: &Trade) {
    println!(
        "  {}  {:<4} {:>6.2} SOL  {:>6} tokens  {:<10} {}",
        trade.timestamp.format("%H:%M:%S"),
        trade.side,
        trade.amount,
        trade.token_amount,
        trade.user,
        trade.tx_hash
    );
}
