//! Tests for configuration loading and validation.

mod common;

use common::*;
use std::path::PathBuf;

#[test]
fn test_default_parameters() {
    let config = ClassifierConfig::default();
    assert_eq!(config.references.len(), 3);
    assert_eq!(config.categories.len(), 3);
    assert_eq!(config.blur_kernel, 11);
    assert_eq!(config.threshold_block, 21);
    assert_eq!(config.threshold_bias, 5);
    assert_eq!(config.closing_kernel, 7);
    assert_eq!(config.min_area, 5.0);
    assert_eq!(config.max_area, 5000.0);
    assert!(config.validate().is_ok());
}

#[test]
fn test_category_count_must_match_references() {
    let config = ClassifierConfig::default()
        .with_categories(CategoryTable::new(vec!["a".into(), "b".into()]));

    let err = config.validate().unwrap_err();
    assert!(matches!(
        err,
        ClassifyError::CategoryCountMismatch {
            categories: 2,
            references: 3
        }
    ));
    assert!(ClassificationPipeline::new(config).is_err());
}

#[test]
fn test_rejects_bad_parameters() {
    let even_kernel = ClassifierConfig {
        blur_kernel: 10,
        ..ClassifierConfig::default()
    };
    assert!(matches!(
        even_kernel.validate(),
        Err(ClassifyError::InvalidParameter { parameter: "blur_kernel", .. })
    ));

    let tiny_block = ClassifierConfig {
        threshold_block: 1,
        ..ClassifierConfig::default()
    };
    assert!(tiny_block.validate().is_err());

    let inverted_band = ClassifierConfig {
        min_area: 100.0,
        max_area: 100.0,
        ..ClassifierConfig::default()
    };
    assert!(matches!(
        inverted_band.validate(),
        Err(ClassifyError::InvalidParameter { parameter: "max_area", .. })
    ));

    let no_references = ClassifierConfig::default()
        .with_references(vec![])
        .with_categories(CategoryTable::new(vec![]));
    assert!(no_references.validate().is_err());
}

#[test]
fn test_partial_json_falls_back_to_defaults() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{
            "references": ["a.png", "b.png"],
            "categories": ["bee", "wasp"],
            "max_area": 800.0
        }"#,
    )?;

    let config = ClassifierConfig::from_json_file(&path)?;
    assert_eq!(config.references, vec![PathBuf::from("a.png"), PathBuf::from("b.png")]);
    assert_eq!(config.categories.name(1), Some("wasp"));
    assert_eq!(config.max_area, 800.0);
    assert_eq!(config.blur_kernel, 11);
    assert!(config.validate().is_ok());
    Ok(())
}

#[test]
fn test_malformed_json_is_config_error() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json")?;

    let err = ClassifierConfig::from_json_file(&path).unwrap_err();
    assert!(matches!(err, ClassifyError::Config(_)));
    Ok(())
}

#[test]
fn test_missing_reference_is_fatal() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let mut config = reference_config(dir.path());
    config.references[1] = dir.path().join("gone.png");

    let err = ReferenceSet::build(&config).unwrap_err();
    assert!(matches!(err, ClassifyError::ImageDecode { .. }));
    Ok(())
}
