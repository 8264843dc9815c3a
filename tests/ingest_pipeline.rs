use std::fs;

use sunscreen_catalog::pipeline::{ingest, parse_submission, write_canonical};
use sunscreen_catalog::{
    CatalogError, JsonFileStore, PipelineConfig, RecordStore, SubmissionInput, SunscreenType,
    build_canonical, derive_type, detect_filters, generate_id, split_ingredients,
};
use tempfile::tempdir;

fn submission(brand: &str, product: &str, ingredients: &str) -> SubmissionInput {
    SubmissionInput {
        brand: Some(brand.to_string()),
        product_name: Some(product.to_string()),
        ingredients_inci: Some(ingredients.to_string()),
        ..SubmissionInput::default()
    }
}

fn config_in(dir: &std::path::Path) -> PipelineConfig {
    PipelineConfig {
        store_path: dir.join("sunscreens.json"),
        cleaned_path: dir.join("sunscreens.cleaned.json"),
        env_file: Some(dir.join("github_env")),
        exclusive_lock: false,
    }
}

#[test]
fn reformulated_spf_variant_collides_with_existing_entry() {
    assert_eq!(
        generate_id("La Roche-Posay", "Anthelios SPF 50+"),
        generate_id("La Roche-Posay", "Anthelios SPF 60")
    );

    let dir = tempdir().unwrap();
    let config = config_in(dir.path());
    let first = submission("La Roche-Posay", "Anthelios SPF 50+", "Aqua, Homosalate");
    let second = submission("La Roche-Posay", "Anthelios SPF 60", "Aqua, Octocrylene");

    ingest(&first, &config).unwrap();
    let err = ingest(&second, &config).unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateRecord { ref id } if id == "la-roche-posay-anthelios"));
    assert_eq!(JsonFileStore::new(&config.store_path).load().unwrap().len(), 1);
}

#[test]
fn rejected_duplicate_leaves_ci_environment_untouched() {
    let dir = tempdir().unwrap();
    let config = config_in(dir.path());
    let env_file = config.env_file.clone().unwrap();

    ingest(
        &submission("La Roche-Posay", "Anthelios SPF 50+", "Aqua, Homosalate"),
        &config,
    )
    .unwrap();
    let before = fs::read(&env_file).unwrap();
    assert!(!before.is_empty());

    let err = ingest(
        &submission("La Roche-Posay", "Anthelios SPF 60", "Aqua, Octocrylene"),
        &config,
    )
    .unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateRecord { .. }));
    assert_eq!(fs::read(&env_file).unwrap(), before);
}

#[test]
fn ingredient_splitting_properties() {
    assert!(split_ingredients(None).is_empty());
    assert!(split_ingredients(Some("")).is_empty());
    assert_eq!(
        split_ingredients(Some("Zinc Oxide, Titanium Dioxide,  ,Water")),
        vec!["Zinc Oxide", "Titanium Dioxide", "Water"]
    );
}

#[test]
fn classification_follows_detected_filters() {
    let hybrid = detect_filters(&split_ingredients(Some("Water, Zinc Oxide, Avobenzone")));
    assert_eq!(derive_type(&hybrid), Some(SunscreenType::Hybrid));

    let chemical = detect_filters(&split_ingredients(Some("Octocrylene, Homosalate, Water")));
    assert_eq!(derive_type(&chemical), Some(SunscreenType::Chemical));

    let neither = detect_filters(&split_ingredients(Some("Water, Glycerin")));
    assert_eq!(derive_type(&neither), None);
}

#[test]
fn unrecognized_ingredients_build_a_typeless_record() {
    let record = build_canonical(&submission(
        "Plain Brand",
        "Daily Lotion",
        "Water, Glycerin, Cetearyl Alcohol",
    ))
    .unwrap();
    assert!(record.filters.is_empty());
    assert_eq!(record.sunscreen_type, None);
    assert_eq!(record.ingredients.len(), 3);
}

#[test]
fn parse_then_write_round_trips_through_the_handoff() {
    let dir = tempdir().unwrap();
    let config = config_in(dir.path());
    let input = SubmissionInput {
        spf: Some("SPF 50+".to_string()),
        pa_rating: Some("PA++++".to_string()),
        korean: Some("Yes".to_string()),
        source_url: Some("https://example.com/relief-sun".to_string()),
        ..submission(
            "Beauty of Joseon",
            "Relief Sun: Rice + Probiotics",
            "Water, Oryza Sativa Extract, Dibutyl Adipate, Ethylhexyl Triazone, Methylene Bis-Benzotriazolyl Tetramethylbutylphenol",
        )
    };

    let (record, handoff) = parse_submission(&input, &config).unwrap();
    assert_eq!(handoff.id, "beauty-of-joseon-relief-sun-rice-probiotics");
    assert_eq!(record.sunscreen_type, Some(SunscreenType::Chemical));
    assert_eq!(record.korean, Some(true));

    let env_text = fs::read_to_string(config.env_file.as_ref().unwrap()).unwrap();
    let payload = env_text
        .lines()
        .find_map(|line| line.strip_prefix("SUNSCREEN_CANONICAL_JSON="))
        .unwrap();
    let expected_id = env_text
        .lines()
        .find_map(|line| line.strip_prefix("SUNSCREEN_ID="))
        .unwrap();

    let written = write_canonical(payload, Some(expected_id), &config).unwrap();
    assert_eq!(written, record);
    assert_eq!(
        JsonFileStore::new(&config.store_path).load().unwrap(),
        vec![record]
    );
}

#[test]
fn validation_failure_writes_nothing() {
    let dir = tempdir().unwrap();
    let config = config_in(dir.path());
    let err = ingest(&SubmissionInput::default(), &config).unwrap_err();
    assert!(matches!(err, CatalogError::Validation { ref missing } if missing.len() == 3));
    assert!(!config.store_path.exists());
    assert!(!config.env_file.unwrap().exists());
}
