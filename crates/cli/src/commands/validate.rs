use anyhow::{Context, Result};
use brand_site_core::load_site_config;
use brand_site_validator::{ValidationReport, validate_project};
use std::path::PathBuf;

pub fn run(path: PathBuf) -> Result<()> {
    println!("Validating site at: {}", path.display());

    let config = load_site_config(&path)
        .with_context(|| format!("Failed to load site.toml in {}", path.display()))?;
    println!("✓ site.toml valid");

    let report = validate_project(&config);
    print_report(&report);

    if !report.is_ok() {
        anyhow::bail!("Validation failed with {} error(s)", report.errors.len());
    }
    Ok(())
}

fn print_report(report: &ValidationReport) {
    for line in &report.info {
        println!("  {}", line);
    }
    for line in &report.warnings {
        println!("  ⚠ {}", line);
    }
    for line in &report.errors {
        println!("  ✗ {}", line);
    }
    println!(
        "\n{} error(s), {} warning(s)",
        report.errors.len(),
        report.warnings.len()
    );
}
