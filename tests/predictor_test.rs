mod common;

use base64::Engine;
use loanwise::model::artifact::sha256_file;
use loanwise::{encode, FeatureVector, PredictorAdapter, Verdict};

use common::{fixture, scenario_a, ExplodingLoader, MissingArtifactLoader, StubLoader};

#[test]
fn test_label_zero_is_rejection() -> Result<(), Box<dyn std::error::Error>> {
    common::init();
    let fixture = fixture(None)?;
    let adapter = PredictorAdapter::with_loader(fixture.config.clone(), StubLoader::new(0));

    let outcome = adapter.predict(&encode(&scenario_a()))?.expect("label 0 has an outcome");
    assert_eq!(outcome.verdict, Verdict::Rejected);
    assert!(!outcome.is_approved());
    assert_eq!(
        outcome.message(),
        "According to our calculations, you will not get the loan from the bank."
    );
    assert_eq!(outcome.image.alt, "No gif");
    assert_eq!(
        outcome.image.data,
        base64::engine::general_purpose::STANDARD.encode(common::REJECTION_BYTES)
    );
    Ok(())
}

#[test]
fn test_label_one_is_approval() -> Result<(), Box<dyn std::error::Error>> {
    common::init();
    let fixture = fixture(None)?;
    let adapter = PredictorAdapter::with_loader(fixture.config.clone(), StubLoader::new(1));

    let outcome = adapter.predict(&encode(&scenario_a()))?.expect("label 1 has an outcome");
    assert_eq!(outcome.verdict, Verdict::Approved);
    assert_eq!(outcome.message(), "Congratulations!! You will get the loan from the bank.");
    let html = outcome.to_html();
    assert!(html.starts_with(r#"<img src="data:image/gif;base64,"#));
    assert!(html.ends_with(r#"alt="Yes gif">"#));
    Ok(())
}

#[test]
fn test_unexpected_label_renders_nothing() -> Result<(), Box<dyn std::error::Error>> {
    common::init();
    let fixture = fixture(None)?;
    for label in [2, -1] {
        let adapter = PredictorAdapter::with_loader(fixture.config.clone(), StubLoader::new(label));
        assert!(adapter.predict(&encode(&scenario_a()))?.is_none());
    }
    Ok(())
}

#[test]
fn test_missing_model_is_single_failure() -> Result<(), Box<dyn std::error::Error>> {
    common::init();
    let fixture = fixture(None)?;
    let adapter = PredictorAdapter::with_loader(fixture.config.clone(), MissingArtifactLoader);

    let err = adapter.predict(&encode(&scenario_a())).unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("An error occurred: "));
    assert!(message.contains("Random_Forest.json"));
    assert_eq!(message.lines().count(), 1);
    Ok(())
}

#[test]
fn test_real_loader_missing_file() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = fixture(None)?;
    let adapter = PredictorAdapter::new(fixture.config.clone());
    let err = adapter.predict(&encode(&scenario_a())).unwrap_err();
    assert!(err.detail().contains("Random_Forest.json"));
    Ok(())
}

#[test]
fn test_corrupt_model_fails() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = fixture(Some("corrupted data"))?;
    let adapter = PredictorAdapter::new(fixture.config.clone());
    let err = adapter.predict(&encode(&scenario_a())).unwrap_err();
    assert!(err.detail().starts_with("Failed to parse model"));
    Ok(())
}

#[test]
fn test_predict_failure_fails() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = fixture(None)?;
    let adapter = PredictorAdapter::with_loader(fixture.config.clone(), ExplodingLoader);
    let err = adapter.predict(&encode(&scenario_a())).unwrap_err();
    assert_eq!(err.to_string(), "An error occurred: Prediction error: model exploded");
    Ok(())
}

#[test]
fn test_missing_asset_fails_before_model_load() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = fixture(None)?;
    std::fs::remove_file(&fixture.config.rejection_asset)?;
    let loader = StubLoader::new(1);
    let adapter = PredictorAdapter::with_loader(fixture.config.clone(), loader.clone());

    let err = adapter.predict(&encode(&scenario_a())).unwrap_err();
    assert!(err.detail().contains("green-cola-no.gif"));
    assert_eq!(loader.load_count(), 0);
    Ok(())
}

#[test]
fn test_model_reloaded_every_call() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = fixture(None)?;
    let loader = StubLoader::new(1);
    let adapter = PredictorAdapter::with_loader(fixture.config.clone(), loader.clone());
    let features = encode(&scenario_a());
    for _ in 0..3 {
        adapter.predict(&features)?;
    }
    assert_eq!(loader.load_count(), 3);
    Ok(())
}

#[test]
fn test_forest_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    common::init();
    let fixture = fixture(Some(common::CREDIT_FOREST))?;
    let adapter = PredictorAdapter::new(fixture.config.clone());

    let approved = adapter.predict(&encode(&scenario_a()))?.expect("outcome");
    assert_eq!(approved.verdict, Verdict::Approved);

    let mut bad_credit = scenario_a();
    bad_credit.credit_history = 0.0;
    let rejected = adapter.predict(&encode(&bad_credit))?.expect("outcome");
    assert_eq!(rejected.verdict, Verdict::Rejected);
    Ok(())
}

#[test]
fn test_forest_with_unknown_categories_still_predicts() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = fixture(Some(common::CREDIT_FOREST))?;
    let adapter = PredictorAdapter::new(fixture.config.clone());
    let features = FeatureVector::from([
        0.0, 0.0, 700.0, 12.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0,
    ]);
    // Tree one votes 0.3 for approval, tree two 0.75: mean 0.525
    let outcome = adapter.predict(&features)?.expect("outcome");
    assert_eq!(outcome.verdict, Verdict::Approved);
    Ok(())
}

#[test]
fn test_model_hash_check() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = fixture(Some(common::CREDIT_FOREST))?;
    let digest = sha256_file(&fixture.config.model_path)?;

    let mut config = fixture.config.clone();
    config.model_sha256 = Some(digest.to_uppercase());
    assert!(PredictorAdapter::new(config.clone()).predict(&encode(&scenario_a()))?.is_some());

    config.model_sha256 = Some("0".repeat(64));
    let err = PredictorAdapter::new(config).predict(&encode(&scenario_a())).unwrap_err();
    assert!(err.detail().starts_with("Hash mismatch"));
    Ok(())
}

#[test]
fn test_forest_width_mismatch_fails() -> Result<(), Box<dyn std::error::Error>> {
    let narrow = common::CREDIT_FOREST.replace(r#""n_features": 16"#, r#""n_features": 5"#);
    let fixture = fixture(Some(&narrow))?;
    let err = PredictorAdapter::new(fixture.config.clone())
        .predict(&encode(&scenario_a()))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "An error occurred: Model expects 5 features per sample, got 16"
    );
    Ok(())
}
