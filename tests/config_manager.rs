use genetrade::config::{AppConfig, ConfigManager, ParameterSpec};
use genetrade::engines::parameters::ParameterKind;
use genetrade::GenetradeError;
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("genetrade_{}_{}", std::process::id(), name))
}

fn sample_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.evolution.population_size = 20;
    config.evolution.iterations = 4;
    config.evolution.seed = Some(99);
    config.parameters.parameters = vec![
        ParameterSpec {
            name: "sell_delay_seconds".to_string(),
            initial: 3600.0,
            min: Some(30.0),
            max: Some(86400.0),
            kind: ParameterKind::Integer,
        },
        ParameterSpec {
            name: "threshold".to_string(),
            initial: 0.5,
            min: None,
            max: None,
            kind: ParameterKind::Real,
        },
    ];
    config
}

#[test]
fn test_save_load_and_env_override() {
    let path = temp_path("roundtrip.toml");

    let manager = ConfigManager::new();
    manager.update(|c| *c = sample_config()).unwrap();
    manager.save_to_file(&path).unwrap();

    let loaded = ConfigManager::new();
    loaded.load_from_file(&path).unwrap();
    assert_eq!(loaded.get(), sample_config());

    std::env::set_var("GENETRADE_EVOLUTION__SEED", "7");
    let overridden = ConfigManager::new();
    let result = overridden.load_from_file(&path);
    std::env::remove_var("GENETRADE_EVOLUTION__SEED");
    result.unwrap();
    assert_eq!(overridden.get().evolution.seed, Some(7));
    assert_eq!(overridden.get().evolution.population_size, 20);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_partial_json_uses_defaults() {
    let path = temp_path("partial.json");
    std::fs::write(&path, r#"{ "evolution": { "population_size": 8 } }"#).unwrap();

    let manager = ConfigManager::new();
    manager.load_from_file(&path).unwrap();
    let config = manager.get();

    assert_eq!(config.evolution.population_size, 8);
    assert_eq!(config.evolution.tournament_size, 3);
    assert_eq!(config.evolution.cross_rate, 0.9);
    assert!(config.parameters.parameters.is_empty());

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_load_rejects_invalid_config() {
    let path = temp_path("odd.toml");
    std::fs::write(&path, "[evolution]\npopulation_size = 5\n").unwrap();

    let manager = ConfigManager::new();
    let result = manager.load_from_file(&path);
    assert!(matches!(result, Err(GenetradeError::Configuration(_))));
    // Previous configuration is kept
    assert_eq!(manager.get(), AppConfig::default());

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_load_missing_file() {
    let manager = ConfigManager::new();
    assert!(manager.load_from_file(temp_path("does_not_exist.toml")).is_err());
}

#[test]
fn test_update_rolls_back_on_failure() {
    let manager = ConfigManager::new();

    let result = manager.update(|c| c.evolution.cross_rate = 2.0);
    assert!(result.is_err());
    assert_eq!(manager.get().evolution.cross_rate, 0.9);

    manager.update(|c| c.evolution.cross_rate = 0.5).unwrap();
    assert_eq!(manager.get().evolution.cross_rate, 0.5);
}
