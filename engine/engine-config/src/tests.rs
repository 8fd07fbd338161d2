//! Tests for the configuration module.

use super::*;

#[test]
fn test_default_config() {
    let config = CentralConfig::default();
    assert_eq!(config.common.log_level, "info");
    assert_eq!(config.actor.games, 10);
    assert_eq!(config.actor.seed, 42);
    assert_eq!(config.actor.log_interval, 1);
}

#[test]
fn test_mcts_defaults() {
    let config = CentralConfig::default();
    assert!((config.mcts.exploration_constant - 1.4).abs() < f64::EPSILON);
    assert!((config.mcts.win_reward - 1.0).abs() < f64::EPSILON);
    assert!((config.mcts.loss_reward + 100.0).abs() < f64::EPSILON);
    assert_eq!(config.mcts.budget_mode, "wallclock");
    assert_eq!(config.mcts.iterations, 10000);
    assert_eq!(config.mcts.time_limit_ms, 1900);
    assert_eq!(config.mcts.opening_time_limit_ms, 25000);
    assert!(config.mcts.persistent);
}

// Each env test uses its own variables; tests run in parallel in one process.

#[test]
fn test_mcts_env_overrides() {
    std::env::set_var("UCT_MCTS_BUDGET_MODE", "iterations");
    std::env::set_var("UCT_MCTS_ITERATIONS", "321");
    std::env::set_var("UCT_MCTS_PERSISTENT", "false");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.mcts.budget_mode, "iterations");
    assert_eq!(config.mcts.iterations, 321);
    assert!(!config.mcts.persistent);

    std::env::remove_var("UCT_MCTS_BUDGET_MODE");
    std::env::remove_var("UCT_MCTS_ITERATIONS");
    std::env::remove_var("UCT_MCTS_PERSISTENT");
}

#[test]
fn test_actor_env_overrides() {
    std::env::set_var("UCT_ACTOR_GAMES", "7");
    std::env::set_var("UCT_ACTOR_SEED", "12345");

    let config = load_config();
    assert_eq!(config.actor.games, 7);
    assert_eq!(config.actor.seed, 12345);

    std::env::remove_var("UCT_ACTOR_GAMES");
    std::env::remove_var("UCT_ACTOR_SEED");
}

#[test]
fn test_unparsable_env_value_is_ignored() {
    std::env::set_var("UCT_MCTS_WIN_REWARD", "lots");

    let config = apply_env_overrides(CentralConfig::default());
    assert!((config.mcts.win_reward - 1.0).abs() < f64::EPSILON);

    std::env::remove_var("UCT_MCTS_WIN_REWARD");
}

#[test]
fn test_parse_config_toml() {
    let toml_content = r#"
[common]
log_level = "debug"

[mcts]
exploration_constant = 0.7
budget_mode = "iterations"
iterations = 2000
persistent = false

[actor]
games = 100
seed = 7
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.common.log_level, "debug");
    assert!((config.mcts.exploration_constant - 0.7).abs() < f64::EPSILON);
    assert_eq!(config.mcts.budget_mode, "iterations");
    assert_eq!(config.mcts.iterations, 2000);
    assert!(!config.mcts.persistent);
    assert_eq!(config.actor.games, 100);
    assert_eq!(config.actor.seed, 7);
}

#[test]
fn test_partial_config() {
    let toml_content = r#"
[mcts]
time_limit_ms = 500
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.mcts.time_limit_ms, 500);
    assert!((config.mcts.loss_reward + 100.0).abs() < f64::EPSILON); // Default
    assert_eq!(config.common.log_level, "info"); // Default
    assert_eq!(config.actor.games, 10); // Default
}

#[test]
fn test_load_from_missing_path_uses_defaults() {
    let config = load_from_path(std::path::Path::new("/nonexistent/uct/config.toml"));
    assert_eq!(config.mcts.time_limit_ms, 1900);
}

#[test]
fn test_load_from_invalid_file_uses_defaults() {
    let path = std::env::temp_dir().join(format!("uct-config-{}.toml", std::process::id()));
    std::fs::write(&path, "[mcts\nthis is not toml").unwrap();

    let config = load_from_path(&path);
    assert!((config.mcts.exploration_constant - 1.4).abs() < f64::EPSILON);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_load_from_file() {
    let path = std::env::temp_dir().join(format!("uct-config-ok-{}.toml", std::process::id()));
    std::fs::write(&path, "[mcts]\nopening_time_limit_ms = 0\n").unwrap();

    let config = load_from_path(&path);
    assert_eq!(config.mcts.opening_time_limit_ms, 0);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_config_clone() {
    let config = CentralConfig::default();
    let cloned = config.clone();
    assert_eq!(config.mcts.budget_mode, cloned.mcts.budget_mode);
    assert_eq!(config.actor.seed, cloned.actor.seed);
}
