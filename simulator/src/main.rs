use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kazik_execution::{casino::SessionDetail, EntropyDraws, FileStore, Layer, SessionView};
use kazik_simulator::{run_report, SimulatorConfig};
use kazik_types::{GameParams, PlinkoRisk, PlinkoRows, RouletteTarget};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML configuration file (defaults apply when it does not exist).
    #[arg(long, default_value = "kazik.yaml")]
    config: PathBuf,

    /// Overrides `log_level` from the configuration file.
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the balance and bonus availability.
    Balance,
    /// Claim the daily bonus.
    Bonus,
    /// Rescue the balance back to the configured amount.
    Reset,
    /// Overwrite the balance.
    SetBalance { amount: u64 },
    /// Spin the roulette wheel once.
    Roulette {
        #[arg(long)]
        stake: u64,
        /// red, black, green, or a number 0-36.
        #[arg(long)]
        target: RouletteTarget,
    },
    /// Drop one plinko ball.
    Plinko {
        #[arg(long)]
        stake: u64,
        #[arg(long, default_value = "8")]
        rows: PlinkoRows,
        #[arg(long, default_value = "low")]
        risk: PlinkoRisk,
    },
    /// Estimate the house edge of every game with fixed strategies.
    Edge {
        #[arg(long, default_value_t = 10_000)]
        trials: u64,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 100)]
        stake: u64,
        /// Print JSON instead of CSV.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn init_tracing(level: &str) -> Result<()> {
    let level: LevelFilter = level
        .parse()
        .with_context(|| format!("invalid log level {level:?}"))?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn now_ms() -> Result<u64> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is before the unix epoch")?;
    Ok(elapsed.as_millis() as u64)
}

/// Play a single-shot game and credit the result.
fn play_once(layer: &mut Layer<FileStore>, params: GameParams, stake: u64) -> Result<SessionView> {
    let mut draws = EntropyDraws::from_entropy();
    let id = layer.start_session(params, stake, &mut draws)?;
    layer.settle(id)?;
    layer
        .session(id)
        .context("settled session missing from history")
}

fn print_outcome(view: &SessionView, balance: u64) {
    match &view.detail {
        SessionDetail::Roulette { number, color, .. } => {
            println!("landed on {number} ({color:?})");
        }
        SessionDetail::Plinko {
            bucket,
            multiplier_bps,
            ..
        } => {
            println!(
                "bucket {bucket} ({}.{:02}x)",
                multiplier_bps / 10_000,
                multiplier_bps % 10_000 / 100
            );
        }
        _ => {}
    }
    println!(
        "{}: stake {} payout {} balance {}",
        view.status.as_str(),
        view.stake,
        view.payout,
        balance
    );
}

fn print_report(trials: u64, seed: u64, stake: u64, json: bool) -> Result<()> {
    info!(trials, seed, stake, "running house edge report");
    let rows = run_report(trials, seed, stake)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }
    println!("game,strategy,trials,avg_wagered,avg_net,house_edge,stderr");
    for row in rows {
        println!(
            "{},{},{},{:.4},{:.4},{:.6},{:.6}",
            row.game,
            row.strategy,
            row.trials,
            row.avg_wagered,
            row.avg_net,
            row.house_edge,
            row.stderr
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = SimulatorConfig::load(&args.config)?;
    init_tracing(args.log_level.as_deref().unwrap_or(&config.log_level))?;

    match args.command {
        Command::Edge {
            trials,
            seed,
            stake,
            json,
        } => print_report(trials, seed, stake, json)?,
        Command::Balance => {
            let layer = config.open_layer()?;
            println!("balance: {}", layer.balance());
            match layer.bonus_remaining_minutes(now_ms()?) {
                0 => println!("daily bonus: available"),
                minutes => println!("daily bonus: in {minutes} mins"),
            }
        }
        Command::Bonus => {
            let mut layer = config.open_layer()?;
            let claim = layer.claim_daily_bonus_message(now_ms()?);
            println!("{}", claim.message);
            println!("balance: {}", layer.balance());
        }
        Command::Reset => {
            let balance = config.open_layer()?.reset_balance()?;
            println!("balance: {balance}");
        }
        Command::SetBalance { amount } => {
            let balance = config.open_layer()?.set_balance(amount)?;
            println!("balance: {balance}");
        }
        Command::Roulette { stake, target } => {
            let mut layer = config.open_layer()?;
            let view = play_once(&mut layer, GameParams::Roulette { target }, stake)?;
            print_outcome(&view, layer.balance());
        }
        Command::Plinko { stake, rows, risk } => {
            let mut layer = config.open_layer()?;
            let view = play_once(&mut layer, GameParams::Plinko { rows, risk }, stake)?;
            print_outcome(&view, layer.balance());
        }
    }
    Ok(())
}
