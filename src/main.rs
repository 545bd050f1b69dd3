use anyhow::{bail, Result};
use std::env;
use std::path::Path;

use tax_ready_etl::logging::init_logging;
use tax_ready_etl::{
    clean_expense_data, create_excel_report, process_asset_depreciation, run_pipeline,
    PipelineConfig, TaxPolicy,
};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

fn main() -> Result<()> {
    init_logging();

    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("run");

    match command {
        "run" => run_all(),
        "clean-expenses" => {
            let [input, output] = operands::<2>(&args)?;
            run_clean(input, output)
        }
        "depreciate-assets" => {
            let [input, output] = operands::<2>(&args)?;
            run_depreciate(input, output)
        }
        "build-report" => {
            let [expenses, assets, output] = operands::<3>(&args)?;
            run_report(expenses, assets, output)
        }
        other => {
            print_usage();
            bail!("Unknown command: {}", other)
        }
    }
}

/// Positional paths after the command name
fn operands<const N: usize>(args: &[String]) -> Result<[&Path; N]> {
    let rest = args.get(2..).unwrap_or(&[]);
    if rest.len() != N {
        print_usage();
        bail!("Expected {} path arguments, got {}", N, rest.len());
    }

    let mut paths = [Path::new(""); N];
    for (slot, arg) in paths.iter_mut().zip(rest) {
        *slot = Path::new(arg.as_str());
    }
    Ok(paths)
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  tax-ready-etl [run]");
    eprintln!("  tax-ready-etl clean-expenses <raw.csv> <cleaned.csv>");
    eprintln!("  tax-ready-etl depreciate-assets <raw.csv> <calculated.csv>");
    eprintln!("  tax-ready-etl build-report <cleaned.csv> <calculated.csv> <report.xlsx>");
}

fn run_all() -> Result<()> {
    println!("🧾 Tax-Ready ETL - Expenses, Assets, Report");
    println!("{}", RULE);

    let config = PipelineConfig::default();
    let summary = run_pipeline(&config)?;

    println!("\n{}", RULE);
    println!("{}", summary.summary());

    let critical = summary.critical_issue_count();
    if critical > 0 {
        println!("⚠️  {} critical data issue(s) need review", critical);
    }
    println!("✅ Report saved to {}", config.paths.report.display());

    Ok(())
}

fn run_clean(input: &Path, output: &Path) -> Result<()> {
    println!("🧹 Cleaning expenses: {}", input.display());
    println!("{}", RULE);

    let report = clean_expense_data(input, output, &TaxPolicy::default())?;

    println!("✓ {}", report.summary());
    println!("✓ Saved to {}", output.display());
    Ok(())
}

fn run_depreciate(input: &Path, output: &Path) -> Result<()> {
    println!("🏭 Depreciating assets: {}", input.display());
    println!("{}", RULE);

    let report = process_asset_depreciation(input, output)?;

    println!("✓ {}", report.summary());
    if let Some(sample) = &report.sample {
        println!("✓ {}", sample.describe());
    }
    println!("✓ Saved to {}", output.display());
    Ok(())
}

fn run_report(expenses: &Path, assets: &Path, output: &Path) -> Result<()> {
    println!("📊 Building report: {}", output.display());
    println!("{}", RULE);

    let metrics = create_excel_report(expenses, assets, output, &TaxPolicy::default())?;

    println!("✓ {}", metrics.summary());
    println!("✅ Report saved to {}", output.display());
    Ok(())
}
