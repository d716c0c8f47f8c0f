use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use std::io::{self, Write};
use std::path::PathBuf;
use tokio::runtime::Handle;
use tracing_subscriber::EnvFilter;
use wallet::application::aggregate::DEFAULT_WORKERS;
use wallet::application::wallet::Wallet;
use wallet::domain::account::Money;
use wallet::domain::payment::Payment;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding accounts.dump, payments.dump and favorites.dump
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Register an account for a phone number
    Register { phone: String },
    /// Credit an account
    Deposit { account: i64, amount: i64 },
    /// Pay from an account
    Pay {
        account: i64,
        amount: i64,
        category: String,
    },
    /// Reject a payment and refund it
    Reject { payment: String },
    /// Pay again like an earlier payment
    Repeat { payment: String },
    /// Sum all payment amounts
    Sum {
        #[arg(long, default_value_t = DEFAULT_WORKERS)]
        workers: usize,
        /// Compute on a background task instead of the worker pool
        #[arg(long)]
        progress: bool,
    },
    /// Print the payments of an account as JSON lines
    Filter {
        account: i64,
        #[arg(long, default_value_t = DEFAULT_WORKERS)]
        workers: usize,
    },
    /// Back up the payments of an account into chunked dump files
    History {
        account: i64,
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value_t = 100)]
        records: usize,
    },
    /// Write all accounts to a single compact file
    ExportCompact { file: PathBuf },
    /// Merge accounts from a compact file
    ImportCompact { file: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut wallet = Wallet::new();
    wallet.import(&cli.data_dir).into_diagnostic()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mutated = match cli.command {
        Command::Register { phone } => {
            let account = wallet.register_account(&phone).into_diagnostic()?;
            writeln!(out, "{}", account.id).into_diagnostic()?;
            true
        }
        Command::Deposit { account, amount } => {
            wallet.deposit(account, Money::new(amount)).into_diagnostic()?;
            true
        }
        Command::Pay {
            account,
            amount,
            category,
        } => {
            let payment = wallet
                .pay(account, Money::new(amount), &category)
                .into_diagnostic()?;
            writeln!(out, "{}", payment.id).into_diagnostic()?;
            true
        }
        Command::Reject { payment } => {
            wallet.reject(&payment).into_diagnostic()?;
            true
        }
        Command::Repeat { payment } => {
            let repeated = wallet.repeat(&payment).into_diagnostic()?;
            writeln!(out, "{}", repeated.id).into_diagnostic()?;
            true
        }
        Command::Sum { workers, progress } => {
            let total = if progress {
                let mut rx = wallet.sum_payments_with_progress(&Handle::current());
                rx.recv()
                    .await
                    .transpose()
                    .into_diagnostic()?
                    .map(|p| p.result)
                    .unwrap_or_default()
            } else {
                wallet.sum_payments(workers).into_diagnostic()?
            };
            writeln!(out, "{total}").into_diagnostic()?;
            false
        }
        Command::Filter { account, workers } => {
            let payments = wallet.filter_payments(account, workers).into_diagnostic()?;
            write_json_lines(&mut out, &payments)?;
            false
        }
        Command::History {
            account,
            out: dir,
            records,
        } => {
            let payments = wallet.export_account_history(account).into_diagnostic()?;
            std::fs::create_dir_all(&dir).into_diagnostic()?;
            wallet.history_to_files(&payments, &dir, records).into_diagnostic()?;
            false
        }
        Command::ExportCompact { file } => {
            wallet.export_to_file(&file).into_diagnostic()?;
            false
        }
        Command::ImportCompact { file } => {
            wallet.import_from_file(&file).into_diagnostic()?;
            true
        }
    };

    if mutated {
        std::fs::create_dir_all(&cli.data_dir).into_diagnostic()?;
        wallet.export(&cli.data_dir).into_diagnostic()?;
    }

    Ok(())
}

fn write_json_lines(out: &mut impl Write, payments: &[Payment]) -> Result<()> {
    for payment in payments {
        serde_json::to_writer(&mut *out, payment).into_diagnostic()?;
        writeln!(out).into_diagnostic()?;
    }
    Ok(())
}
