use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tax_core::EmploymentCategory;

use crate::output::OutputFormat;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Indian income-tax estimator for the new tax regime.
///
/// Reads declared income profiles from JSON or CSV and computes slab tax,
/// the section 87A rebate, surcharge, cess and capital-gains tax.
#[derive(Debug, Parser)]
#[command(name = "taxbot", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every subcommand. Unset options fall back to the
/// config file, then to built-in defaults.
#[derive(Debug, Default, Args)]
pub struct GlobalArgs {
    /// Fiscal year, e.g. `FY2025-26` or `FY 2025-26 / AY 2026-27`.
    #[arg(long = "fy", global = true)]
    pub fiscal_year: Option<String>,

    /// Output format.
    #[arg(long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// CSV file of additional regime tables.
    #[arg(long, global = true)]
    pub regimes: Option<PathBuf>,

    /// TOML config file. `taxbot.toml` in the working directory is read
    /// when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter used when `RUST_LOG` is unset, e.g. `debug`.
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute the tax liability of each profile.
    Compute(ProfileArgs),

    /// Suggest deductions and schemes for each profile.
    Tips(ProfileArgs),

    /// Advance-tax installments for each profile.
    Schedule {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Tax already deducted at source.
        #[arg(long, default_value = "0")]
        tds: Decimal,
    },

    /// Documents to gather before filing.
    Checklist {
        /// Employment category, e.g. `salaried`.
        #[arg(value_parser = parse_category)]
        category: EmploymentCategory,
    },

    /// List the known regime tables.
    Regimes,
}

#[derive(Debug, Clone, Args)]
pub struct ProfileArgs {
    /// Profile file (`.json` or `.csv`), or `-` to read JSON from stdin.
    #[arg(short, long)]
    pub profile: PathBuf,
}

fn parse_category(s: &str) -> Result<EmploymentCategory, String> {
    EmploymentCategory::parse(s).ok_or_else(|| {
        let known: Vec<_> = EmploymentCategory::all()
            .iter()
            .map(EmploymentCategory::as_str)
            .collect();
        format!("unknown category '{s}', expected one of: {}", known.join(", "))
    })
}
