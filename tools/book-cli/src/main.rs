//! Order book driver
//!
//! Replays an order script against a single-instrument limit order book,
//! printing every trade and a depth summary at the end.

mod script;

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use matching_engine::{Orderbook, OrderbookConfig};
use tracing::{debug, info};
use types::level::LevelInfo;
use types::order::Side;
use types::trade::Trade;

use script::Command;

/// Limit order book script runner
#[derive(Parser, Debug)]
#[clap(name = "book-cli")]
#[clap(about = "Replay add/cancel/modify scripts against a limit order book")]
struct Cli {
    /// Script file; reads stdin when omitted
    script: Option<PathBuf>,

    /// Price levels printed per side
    #[clap(long, default_value_t = 5)]
    top: usize,

    /// Pre-allocation hint for resting orders
    #[clap(long, default_value_t = 0)]
    expected_orders: usize,

    /// Log filter when RUST_LOG is unset
    #[clap(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let mut book = Orderbook::with_config(OrderbookConfig {
        expected_orders: cli.expected_orders,
    });

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.script {
        Some(path) => {
            info!(script = %path.display(), "Replaying script");
            let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
            run_script(&mut book, BufReader::new(file), &mut out, cli.top)?;
        }
        None => {
            info!("Replaying script from stdin");
            run_script(&mut book, io::stdin().lock(), &mut out, cli.top)?;
        }
    }

    print_summary(&book, &mut out, cli.top)?;
    Ok(())
}

/// Execute every command in `reader`, writing trades and reports to `out`
fn run_script<R: BufRead, W: Write>(
    book: &mut Orderbook,
    reader: R,
    out: &mut W,
    top: usize,
) -> Result<()> {
    let mut trade_count = 0usize;

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("failed to read line {}", line_no))?;
        let command = script::parse_line(&line)
            .with_context(|| format!("line {}: '{}'", line_no, line.trim()))?;

        let trades = match command {
            None => continue,
            Some(Command::Add(order)) => book.add_order(order),
            Some(Command::Modify(modify)) => book.modify_order(modify),
            Some(Command::Cancel(order_id)) => {
                if book.cancel_order(order_id).is_none() {
                    debug!(line = line_no, %order_id, "Cancel ignored");
                }
                Vec::new()
            }
            Some(Command::Book) => {
                print_summary(book, out, top)?;
                Vec::new()
            }
            Some(Command::Size) => {
                writeln!(out, "size {}", book.size())?;
                Vec::new()
            }
        };

        for trade in &trades {
            print_trade(trade, out)?;
        }
        trade_count += trades.len();
    }

    info!(trades = trade_count, resting = book.size(), "Script finished");
    Ok(())
}

fn print_trade<W: Write>(trade: &Trade, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "trade bid={}@{} ask={}@{} qty={}",
        trade.bid().order_id,
        trade.bid().price,
        trade.ask().order_id,
        trade.ask().price,
        trade.quantity()
    )
}

fn print_levels<W: Write>(label: &str, levels: &[LevelInfo], out: &mut W) -> io::Result<()> {
    writeln!(out, "{}:", label)?;
    if levels.is_empty() {
        writeln!(out, "  (empty)")?;
    }
    for level in levels {
        writeln!(out, "  {:>8} x {}", level.price.to_string(), level.quantity)?;
    }
    Ok(())
}

fn print_summary<W: Write>(book: &Orderbook, out: &mut W, top: usize) -> io::Result<()> {
    let depth = book.depth(top);

    writeln!(
        out,
        "orders={} bid_levels={} ask_levels={}",
        book.size(),
        book.level_count(Side::Buy),
        book.level_count(Side::Sell)
    )?;
    print_levels("asks", depth.asks(), out)?;
    print_levels("bids", depth.bids(), out)?;
    match depth.spread() {
        Some(spread) => writeln!(out, "spread {}", spread),
        None => writeln!(out, "spread -"),
    }
}
