//! CLI commands for snapshot-manifest

use anyhow::{bail, Context, Result};
use std::path::Path;

use crate::config::{load_config, save_config, Config, ProjectPaths};
use crate::models::{Placement, ReferenceStatus, ScreenshotStatus, SyncReport, ValidationReport};
use crate::sync::Synchronizer;
use crate::validation::Validator;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Summary,
}

fn load(root: &Path) -> Result<(Config, ProjectPaths)> {
    let config = load_config(root)?;
    let paths = ProjectPaths::new(root, &config);
    Ok((config, paths))
}

/// Write a default config file into the project root
pub fn init(root: &Path) -> Result<()> {
    let config = Config::default();
    let paths = ProjectPaths::new(root, &config);
    if paths.config.exists() {
        println!("Config already exists at {}", paths.config.display());
        return Ok(());
    }

    save_config(&paths.root, &config)?;
    println!("✓ Created {}", paths.config.display());
    println!();
    println!("Next steps:");
    println!("  snapshot-manifest sync        Add references for new screenshots");
    println!("  snapshot-manifest validate    Check every component is covered");
    Ok(())
}

/// Add manifest references for every screenshot in the preview directory
pub fn sync(root: &Path, dry_run: bool) -> Result<SyncReport> {
    let (config, paths) = load(root)?;
    let report = Synchronizer::new(config, paths).run(dry_run)?;
    print_sync_report(&report, dry_run);
    Ok(report)
}

fn print_sync_report(report: &SyncReport, dry_run: bool) {
    let manifest = report.manifest.display();

    if report.manifest_created {
        let verb = if dry_run { "Would create" } else { "Created" };
        println!("{} manifest skeleton {}", verb, manifest);
    }

    for action in &report.added {
        let placement = match action.placement {
            Placement::UnderHeading => "under existing heading",
            Placement::NewSection => "as new section",
        };
        println!("  + {} ({})", action.filename, placement);
    }

    if !report.manifest_updated {
        println!("[INFO] No changes needed for {}", manifest);
    } else if dry_run {
        println!("[DRY RUN] {} reference(s) would be added to {}", report.added.len(), manifest);
    } else {
        println!("[SUCCESS] Updated {} with new screenshot references", manifest);
    }
}

/// Check screenshots and manifest references, repairing missing references.
/// In strict mode a missing screenshot fails the command.
pub fn validate(root: &Path, strict: bool, format: OutputFormat) -> Result<ValidationReport> {
    let (config, paths) = load(root)?;
    let report = Validator::new(config, paths).run()?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .context("Failed to serialize validation report")?;
            println!("{}", json);
        }
        OutputFormat::Summary => print_validation_report(&report),
    }

    if strict && !report.missing_screenshots.is_empty() {
        bail!(
            "Validation failed in strict mode: {} screenshot(s) missing",
            report.missing_screenshots.len()
        );
    }

    Ok(report)
}

fn print_validation_report(report: &ValidationReport) {
    println!("Checking screenshots...");
    for component in &report.components {
        match component.screenshot {
            ScreenshotStatus::Missing => println!("  ⚠ Missing screenshot: {}.png", component.name),
            ScreenshotStatus::TooSmall { bytes } => println!(
                "  ⚠ Screenshot too small, likely invalid: {}.png ({} bytes)",
                component.name, bytes
            ),
            ScreenshotStatus::Ok { bytes } => {
                println!("  ✓ Found screenshot: {}.png ({} bytes)", component.name, bytes)
            }
        }
    }

    if !report.missing_screenshots.is_empty() {
        println!();
        println!(
            "⚠ Warning: {} component screenshot(s) missing!",
            report.missing_screenshots.len()
        );
        for filename in &report.missing_screenshots {
            println!("  - {}", filename);
        }
        println!("Run the UI snapshot tests to generate them.");
    }

    let undersized: Vec<_> = report.undersized_screenshots().collect();
    if !undersized.is_empty() {
        println!();
        println!("⚠ Warning: {} screenshot(s) look invalid:", undersized.len());
        for component in undersized {
            println!("  - {}.png ({})", component.name, component.screenshot);
        }
    }

    println!();
    println!("Checking references in {}...", report.manifest.display());
    for component in &report.components {
        match component.reference {
            ReferenceStatus::Ok => println!("  ✓ Referenced: {}", component.name),
            ReferenceStatus::Nonstandard(tier) => {
                println!("  ⚠ Referenced, but not in standard format ({}): {}", tier, component.name)
            }
            ReferenceStatus::Missing => println!("  ✗ Missing reference: {}", component.name),
        }
    }

    println!();
    if report.repaired.is_empty() {
        println!("✓ Every component is referenced in the manifest");
    } else {
        println!("Adding {} missing reference(s)...", report.repaired.len());
        for name in &report.repaired {
            println!("  + {}", name);
        }
        if report.manifest_updated {
            println!("✓ Updated {}", report.manifest.display());
        }
    }

    println!();
    println!("Validation complete!");
}
