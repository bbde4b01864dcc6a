use figment::{
    Figment, Jail,
    providers::{Env, Format, Toml},
};

use crate::AppConfig;

#[test]
fn test_defaults() {
    let config: AppConfig = Figment::new().extract().unwrap();
    assert_eq!(config.telemetry.log_level, "info");
    assert!(!config.telemetry.json_logs);
    assert!(config.policy.conflict_matrix.is_none());
    assert!(config.policy.role_templates.is_none());
}

#[test]
fn test_toml_values() {
    let toml = r#"
        [telemetry]
        log_level = "debug"
        json_logs = true

        [policy]
        conflict_matrix = "seeds/role_incompatible.json"
        role_templates = "seeds/seed_role_permissions.json"
    "#;

    let config: AppConfig = Figment::from(Toml::string(toml)).extract().unwrap();
    assert_eq!(config.telemetry.log_level, "debug");
    assert!(config.telemetry.json_logs);
    assert_eq!(
        config.policy.conflict_matrix.as_deref(),
        Some(std::path::Path::new("seeds/role_incompatible.json"))
    );
}

#[test]
fn test_env_override() {
    Jail::expect_with(|jail| {
        jail.set_env("TPA_TELEMETRY__LOG_LEVEL", "warn");

        let config: AppConfig = Figment::new()
            .merge(Env::prefixed("TPA_").split("__"))
            .extract()?;
        assert_eq!(config.telemetry.log_level, "warn");
        Ok(())
    });
}
