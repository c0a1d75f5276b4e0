//! Subcommand implementations. Each returns the text to print on stdout.

use std::fs::File;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;
use tax_core::advice::{Tip, TipCategory, document_checklist, regime_summary, smart_tips};
use tax_core::calculations::common::rate_to_percent;
use tax_core::calculations::{Installment, advance_tax_schedule};
use tax_core::format::{format_indian_currency, indian_amount_display};
use tax_core::{
    EmploymentCategory, IncomeProfile, RegimeRegistry, TaxRegimeConfig, TaxResult,
    compute_liability_with,
};
use tax_data::{ProfileLoader, RegimeLoader};
use tracing::{debug, info};

use crate::cli::Command;
use crate::config::Settings;
use crate::output::{self, OutputFormat};

// ─── entry point ─────────────────────────────────────────────────────────────

pub fn run(
    command: &Command,
    settings: &Settings,
) -> Result<String> {
    let registry = build_registry(settings.regimes_csv.as_deref())?;

    match command {
        Command::Compute(args) => compute(&registry, settings, &args.profile),
        Command::Tips(args) => tips(&registry, settings, &args.profile),
        Command::Schedule { profile, tds } => schedule(&registry, settings, &profile.profile, *tds),
        Command::Checklist { category } => checklist(*category, settings.format),
        Command::Regimes => regimes(&registry, settings.format),
    }
}

// ─── inputs ──────────────────────────────────────────────────────────────────

/// Built-in regimes plus any tables from `regimes_csv`.
pub fn build_registry(regimes_csv: Option<&Path>) -> Result<RegimeRegistry> {
    let mut registry = RegimeRegistry::with_builtin();

    if let Some(path) = regimes_csv {
        let file = File::open(path)
            .with_context(|| format!("Failed to open regime file: {}", path.display()))?;
        let configs = RegimeLoader::parse(file)
            .with_context(|| format!("Invalid regime file: {}", path.display()))?;
        let count = RegimeLoader::load(&mut registry, configs)?;
        info!(count, path = %path.display(), "loaded custom regimes");
    }

    Ok(registry)
}

/// Profiles from a `.csv` file, any other file as JSON, or JSON on stdin
/// for `-`.
pub fn load_profiles(path: &Path) -> Result<Vec<IncomeProfile>> {
    if path == Path::new("-") {
        return ProfileLoader::from_json(io::stdin().lock())
            .context("Failed to read profile from stdin");
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open profile file: {}", path.display()))?;
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    let profiles = if is_csv {
        ProfileLoader::from_csv(file)
    } else {
        ProfileLoader::from_json(file)
    };

    profiles.with_context(|| format!("Invalid profile file: {}", path.display()))
}

fn lookup<'a>(
    registry: &'a RegimeRegistry,
    fiscal_year: &str,
) -> Result<&'a TaxRegimeConfig> {
    registry.get(fiscal_year).with_context(|| {
        format!(
            "No regime for {fiscal_year}; known fiscal years: {}",
            registry.available().join(", ")
        )
    })
}

fn liability(
    profile: &IncomeProfile,
    regime: &TaxRegimeConfig,
) -> Result<TaxResult> {
    compute_liability_with(profile, regime)
        .with_context(|| format!("Failed to compute {} profile", profile.category()))
}

fn heading(
    category: EmploymentCategory,
    regime: &TaxRegimeConfig,
) -> String {
    format!(
        "{category} profile, {} ({})",
        regime.fiscal_year,
        regime.fiscal_year.assessment_year()
    )
}

// ─── compute ─────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ComputeReport<'a> {
    fiscal_year: String,
    profile: &'a IncomeProfile,
    result: TaxResult,
}

#[derive(Tabled)]
struct AmountRow {
    #[tabled(rename = "Item")]
    item: &'static str,
    #[tabled(rename = "Amount")]
    amount: String,
}

#[derive(Tabled)]
struct SlabRow {
    #[tabled(rename = "Slab")]
    slab: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Taxable")]
    taxable: String,
    #[tabled(rename = "Tax")]
    tax: String,
}

fn compute(
    registry: &RegimeRegistry,
    settings: &Settings,
    path: &Path,
) -> Result<String> {
    let regime = lookup(registry, &settings.fiscal_year)?;
    let profiles = load_profiles(path)?;

    let reports = profiles
        .iter()
        .map(|profile| -> Result<ComputeReport> {
            Ok(ComputeReport {
                fiscal_year: regime.fiscal_year.id(),
                profile,
                result: liability(profile, regime)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    debug!(count = reports.len(), "computed liabilities");

    match settings.format {
        OutputFormat::Json => output::json(&reports),
        OutputFormat::Table => Ok(reports
            .iter()
            .map(|r| render_result(r.profile.category(), &r.result, regime))
            .collect::<Vec<_>>()
            .join("\n\n")),
    }
}

fn render_result(
    category: EmploymentCategory,
    result: &TaxResult,
    regime: &TaxRegimeConfig,
) -> String {
    let amounts = [
        ("Taxable income", result.taxable_income),
        ("Gross tax", result.gross_tax),
        ("Rebate u/s 87A", result.rebate_87a),
        ("Tax after rebate", result.tax_after_rebate),
        ("Surcharge", result.surcharge),
        ("Cess", result.cess),
        ("STCG tax", result.stcg_tax),
        ("LTCG tax", result.ltcg_tax),
        ("Total tax", result.total_tax),
    ]
    .map(|(item, amount)| AmountRow {
        item,
        amount: format_indian_currency(amount),
    });

    let mut sections = vec![heading(category, regime), output::table(&amounts, 1)];

    if !result.tax_breakdown.is_empty() {
        let slabs: Vec<SlabRow> = result
            .tax_breakdown
            .iter()
            .map(|entry| SlabRow {
                slab: entry.slab_label.clone(),
                rate: format!("{}%", entry.rate_percent),
                taxable: format_indian_currency(entry.taxable_amount_in_slab),
                tax: format_indian_currency(entry.tax_in_slab),
            })
            .collect();
        sections.push(output::table(&slabs, 1));
    }

    sections.push(format!("Total tax: {}", indian_amount_display(result.total_tax)));
    sections.push(if result.advance_tax_required {
        "Advance tax: required".to_string()
    } else {
        "Advance tax: not required".to_string()
    });

    sections.join("\n")
}

// ─── tips ────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct TipsReport {
    fiscal_year: String,
    category: EmploymentCategory,
    tips: Vec<Tip>,
}

#[derive(Tabled)]
struct TipRow {
    #[tabled(rename = "Category")]
    category: TipCategory,
    #[tabled(rename = "Tip")]
    title: String,
    #[tabled(rename = "Details")]
    description: String,
}

fn tips(
    registry: &RegimeRegistry,
    settings: &Settings,
    path: &Path,
) -> Result<String> {
    let regime = lookup(registry, &settings.fiscal_year)?;
    let profiles = load_profiles(path)?;

    let reports = profiles
        .iter()
        .map(|profile| -> Result<TipsReport> {
            let result = liability(profile, regime)?;
            Ok(TipsReport {
                fiscal_year: regime.fiscal_year.id(),
                category: profile.category(),
                tips: smart_tips(profile, &result, regime),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    match settings.format {
        OutputFormat::Json => output::json(&reports),
        OutputFormat::Table => Ok(reports
            .iter()
            .map(|report| {
                let rows: Vec<TipRow> = report
                    .tips
                    .iter()
                    .map(|tip| TipRow {
                        category: tip.category,
                        title: tip.title.clone(),
                        description: tip.description.clone(),
                    })
                    .collect();
                format!(
                    "{}\n{}",
                    heading(report.category, regime),
                    output::table(&rows, 3)
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")),
    }
}

// ─── schedule ────────────────────────────────────────────────────────────────

const DATE_FORMAT: &str = "%d %b %Y";

#[derive(Debug, Serialize)]
struct ScheduleReport {
    fiscal_year: String,
    category: EmploymentCategory,
    total_tax: Decimal,
    tds_paid: Decimal,
    installments: Vec<Installment>,
}

#[derive(Tabled)]
struct InstallmentRow {
    #[tabled(rename = "Due date")]
    due_date: String,
    #[tabled(rename = "Cumulative %")]
    cumulative_percent: String,
    #[tabled(rename = "Cumulative")]
    cumulative_amount: String,
    #[tabled(rename = "Installment")]
    amount: String,
}

fn schedule(
    registry: &RegimeRegistry,
    settings: &Settings,
    path: &Path,
    tds_paid: Decimal,
) -> Result<String> {
    let regime = lookup(registry, &settings.fiscal_year)?;
    let profiles = load_profiles(path)?;

    let reports = profiles
        .iter()
        .map(|profile| -> Result<ScheduleReport> {
            let result = liability(profile, regime)?;
            let installments = advance_tax_schedule(regime.fiscal_year, &result, tds_paid)
                .context("Failed to build advance tax schedule")?;
            Ok(ScheduleReport {
                fiscal_year: regime.fiscal_year.id(),
                category: profile.category(),
                total_tax: result.total_tax,
                tds_paid,
                installments,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    match settings.format {
        OutputFormat::Json => output::json(&reports),
        OutputFormat::Table => Ok(reports
            .iter()
            .map(|report| render_schedule(report, regime))
            .collect::<Vec<_>>()
            .join("\n\n")),
    }
}

fn render_schedule(
    report: &ScheduleReport,
    regime: &TaxRegimeConfig,
) -> String {
    let summary = format!(
        "{}\nIncome earned {} to {}\nTotal tax {}, TDS {}",
        heading(report.category, regime),
        regime.fiscal_year.start_date().format(DATE_FORMAT),
        regime.fiscal_year.end_date().format(DATE_FORMAT),
        format_indian_currency(report.total_tax),
        format_indian_currency(report.tds_paid)
    );

    if report.installments.is_empty() {
        return format!("{summary}\nNo advance tax due.");
    }

    let rows: Vec<InstallmentRow> = report
        .installments
        .iter()
        .map(|i| InstallmentRow {
            due_date: i.due_date.format(DATE_FORMAT).to_string(),
            cumulative_percent: format!("{}%", i.cumulative_percent),
            cumulative_amount: format_indian_currency(i.cumulative_amount),
            amount: format_indian_currency(i.amount),
        })
        .collect();

    format!("{summary}\n{}", output::table(&rows, 1))
}

// ─── checklist ───────────────────────────────────────────────────────────────

#[derive(Tabled)]
struct DocumentRow {
    #[tabled(rename = "#")]
    number: usize,
    #[tabled(rename = "Document")]
    document: &'static str,
}

fn checklist(
    category: EmploymentCategory,
    format: OutputFormat,
) -> Result<String> {
    let documents = document_checklist(category);

    match format {
        OutputFormat::Json => output::json(&documents),
        OutputFormat::Table => {
            let rows: Vec<DocumentRow> = documents
                .into_iter()
                .enumerate()
                .map(|(idx, document)| DocumentRow {
                    number: idx + 1,
                    document,
                })
                .collect();
            Ok(format!(
                "Documents for {category} filers\n{}",
                output::table(&rows, 2)
            ))
        }
    }
}

// ─── regimes ─────────────────────────────────────────────────────────────────

#[derive(Tabled)]
struct RegimeRow {
    #[tabled(rename = "Fiscal year")]
    fiscal_year: String,
    #[tabled(rename = "Assessment year")]
    assessment_year: String,
    #[tabled(rename = "Slabs")]
    slabs: usize,
    #[tabled(rename = "Top rate")]
    top_rate: String,
    #[tabled(rename = "Std. deduction")]
    standard_deduction: String,
    #[tabled(rename = "Rebate limit")]
    rebate_income_limit: String,
}

fn regimes(
    registry: &RegimeRegistry,
    format: OutputFormat,
) -> Result<String> {
    let configs = registry
        .available()
        .iter()
        .map(|id| registry.get(id))
        .collect::<Result<Vec<_>, _>>()?;

    match format {
        OutputFormat::Json => output::json(&configs),
        OutputFormat::Table => {
            let rows: Vec<RegimeRow> = configs
                .iter()
                .map(|config| RegimeRow {
                    fiscal_year: config.fiscal_year.id(),
                    assessment_year: config.fiscal_year.assessment_year(),
                    slabs: config.slabs.len(),
                    top_rate: config
                        .slabs
                        .last()
                        .map_or_else(String::new, |s| format!("{}%", rate_to_percent(s.rate))),
                    standard_deduction: format_indian_currency(config.standard_deduction),
                    rebate_income_limit: format_indian_currency(config.rebate_income_limit),
                })
                .collect();

            let summaries: Vec<String> = configs.iter().map(|c| regime_summary(c)).collect();
            Ok(format!(
                "{}\n{}",
                output::table(&rows, 2),
                summaries.join("\n")
            ))
        }
    }
}
