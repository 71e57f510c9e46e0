// Integration tests for screenshot and manifest validation
// Tests artifact classification, reference tiers, repairs, and strict mode

use anyhow::Result;
use snapshot_manifest::commands::{self, OutputFormat};
use snapshot_manifest::config::{Config, ProjectPaths};
use snapshot_manifest::manifest::{ManifestError, ManifestStore};
use snapshot_manifest::models::{FallbackTier, ReferenceStatus, ScreenshotStatus};
use snapshot_manifest::sync::Synchronizer;
use snapshot_manifest::validation::Validator;
use std::fs;
use tempfile::TempDir;

/// Setup test environment with an empty preview directory
fn setup() -> Result<(TempDir, Config, ProjectPaths)> {
    let temp_dir = TempDir::new()?;
    let config = Config::default();
    let paths = ProjectPaths::new(temp_dir.path(), &config);
    fs::create_dir_all(&paths.previews)?;
    Ok((temp_dir, config, paths))
}

fn add_screenshot(paths: &ProjectPaths, name: &str, bytes: usize) -> Result<()> {
    fs::write(paths.previews.join(format!("{}.png", name)), vec![0u8; bytes])?;
    Ok(())
}

#[test]
fn test_missing_manifest_is_fatal() -> Result<()> {
    let (_temp, config, paths) = setup()?;

    let err = Validator::new(config, paths).run().unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ManifestError>(),
        Some(ManifestError::Read { .. })
    ));

    Ok(())
}

#[test]
fn test_screenshot_size_threshold() -> Result<()> {
    let (_temp, config, paths) = setup()?;
    add_screenshot(&paths, "GlassCard", 999)?;
    add_screenshot(&paths, "MenuBarView", 1000)?;
    fs::write(&paths.validate_manifest, "# Manifest\n")?;

    let report = Validator::new(config, paths).run()?;

    let status = |name: &str| {
        report
            .components
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.screenshot)
    };
    assert_eq!(status("GlassCard"), Some(ScreenshotStatus::TooSmall { bytes: 999 }));
    assert_eq!(status("MenuBarView"), Some(ScreenshotStatus::Ok { bytes: 1000 }));
    assert_eq!(report.missing_screenshots.len(), 7);
    assert!(!report.missing_screenshots.contains(&"GlassCard.png".to_string()));
    assert_eq!(report.undersized_screenshots().count(), 1);

    Ok(())
}

#[test]
fn test_arbitrary_alt_text_is_nonstandard() -> Result<()> {
    let (_temp, mut config, paths) = setup()?;
    config.components = vec!["Bar".to_string()];
    fs::write(&paths.validate_manifest, "# Manifest\n\n![something](docs/previews/Bar.png)\n")?;

    let report = Validator::new(config, paths.clone()).run()?;

    assert_eq!(
        report.components[0].reference,
        ReferenceStatus::Nonstandard(FallbackTier::AnyAltExactPath)
    );
    assert!(report.repaired.is_empty());
    assert!(!report.manifest_updated);

    Ok(())
}

#[test]
fn test_repair_covers_every_component() -> Result<()> {
    let (_temp, config, paths) = setup()?;
    fs::write(
        &paths.validate_manifest,
        "# Manifest\n\n## GlassCard\n![GlassCard shot](docs/previews/archive/glass.png)\n",
    )?;

    let report = Validator::new(config.clone(), paths.clone()).run()?;

    assert_eq!(report.repaired.len(), 8);
    assert!(report.manifest_updated);
    let content = fs::read_to_string(&paths.validate_manifest)?;
    for name in &report.repaired {
        let section = format!("\n## {}\n![{}预览](docs/previews/{}.png)\n\n", name, name, name);
        assert!(content.contains(&section), "missing section for {}", name);
    }

    let rerun = Validator::new(config, paths.clone()).run()?;
    assert!(rerun.repaired.is_empty());
    assert!(!rerun.manifest_updated);
    assert!(rerun
        .components
        .iter()
        .all(|c| c.reference != ReferenceStatus::Missing));
    assert_eq!(fs::read_to_string(&paths.validate_manifest)?, content);

    Ok(())
}

#[test]
fn test_sync_then_validate_scenario() -> Result<()> {
    let (_temp, config, paths) = setup()?;
    add_screenshot(&paths, "MenuBarView", 2048)?;

    let first = Synchronizer::new(config.clone(), paths.clone()).run(false)?;
    assert!(first.manifest_updated);
    let second = Synchronizer::new(config.clone(), paths.clone()).run(false)?;
    assert!(!second.manifest_updated);

    fs::copy(&paths.sync_manifest, &paths.validate_manifest)?;
    let report = Validator::new(config, paths).run()?;

    assert_eq!(report.missing_screenshots.len(), 8);
    let menu_bar = report
        .components
        .iter()
        .find(|c| c.name == "MenuBarView")
        .expect("MenuBarView reported");
    assert_eq!(menu_bar.reference, ReferenceStatus::Ok);
    assert_eq!(menu_bar.screenshot, ScreenshotStatus::Ok { bytes: 2048 });
    assert_eq!(report.repaired.len(), 8);

    Ok(())
}

#[test]
fn test_strict_mode_fails_on_missing_screenshots() -> Result<()> {
    let (temp, _config, paths) = setup()?;
    fs::write(&paths.validate_manifest, "# Manifest\n")?;

    assert!(commands::validate(temp.path(), false, OutputFormat::Summary).is_ok());
    let err = commands::validate(temp.path(), true, OutputFormat::Json).unwrap_err();
    assert!(err.to_string().contains("9 screenshot(s) missing"));

    Ok(())
}

#[test]
fn test_strict_mode_passes_with_all_screenshots() -> Result<()> {
    let (temp, config, paths) = setup()?;
    for name in &config.components {
        add_screenshot(&paths, name, 1500)?;
    }
    fs::write(&paths.validate_manifest, "# Manifest\n")?;

    let report = commands::validate(temp.path(), true, OutputFormat::Summary)?;

    assert!(report.missing_screenshots.is_empty());
    assert_eq!(report.repaired.len(), 9);

    Ok(())
}

#[test]
fn test_config_file_drives_component_list() -> Result<()> {
    let (temp, _config, paths) = setup()?;
    fs::write(
        temp.path().join("snapshot-manifest.toml"),
        "components = [\"Widget\"]\nvalidate_manifest = \"catalog.md\"\n",
    )?;
    fs::write(temp.path().join("catalog.md"), "![Widget Preview](docs/previews/Widget.png)\n")?;
    add_screenshot(&paths, "Widget", 4096)?;

    let report = commands::validate(temp.path(), true, OutputFormat::Summary)?;

    assert_eq!(report.components.len(), 1);
    assert_eq!(report.components[0].reference, ReferenceStatus::Ok);
    assert!(!report.manifest_updated);

    Ok(())
}

#[test]
fn test_directory_as_manifest_is_read_error() -> Result<()> {
    let (_temp, config, paths) = setup()?;
    fs::create_dir_all(&paths.validate_manifest)?;

    let err = Validator::new(config, paths).run().unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ManifestError>(),
        Some(ManifestError::Read { .. })
    ));

    Ok(())
}

#[test]
fn test_unwritable_manifest_is_write_error() -> Result<()> {
    let (_temp, config, paths) = setup()?;
    fs::write(&paths.validate_manifest, "# Manifest\n")?;
    let mut store = ManifestStore::load(&paths.validate_manifest)?;

    // Replace the manifest with a directory so the repair cannot be saved
    fs::remove_file(&paths.validate_manifest)?;
    fs::create_dir_all(&paths.validate_manifest)?;

    let err = Validator::new(config, paths).run_on(&mut store).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ManifestError>(),
        Some(ManifestError::Write { .. })
    ));

    Ok(())
}
