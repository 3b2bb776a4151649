use std::path::Path;

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use profiles::ProfilesConfig;

/// Environment prefix, e.g. `PROFILES__BASE_URL`.
const ENV_PREFIX: &str = "PROFILES__";

/// Layered config:
/// 1) defaults -> 2) YAML (if provided) -> 3) env (`PROFILES__*`) -> 4) CLI overrides
///
/// # Errors
/// Fails on a missing file, unknown keys or values of the wrong type.
pub fn load(path: Option<&Path>, base_url: Option<&str>) -> Result<ProfilesConfig> {
    let mut figment = Figment::new().merge(Serialized::defaults(ProfilesConfig::default()));

    if let Some(path) = path {
        if !path.is_file() {
            anyhow::bail!("config file does not exist: {}", path.display());
        }
        figment = figment.merge(Yaml::file(path));
    }

    figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

    if let Some(base_url) = base_url {
        figment = figment.merge(Serialized::default("base_url", base_url));
    }

    figment.extract().context("invalid configuration")
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults_without_sources() {
        Jail::expect_with(|_jail| {
            let config = load(None, None).unwrap();
            assert_eq!(config, ProfilesConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_yaml_then_env_then_cli() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "profiles.yaml",
                "base_url: https://profiles.example.com/api\nmax_body_size: 2048\n",
            )?;

            let config = load(Some(Path::new("profiles.yaml")), None).unwrap();
            assert_eq!(config.base_url, "https://profiles.example.com/api");
            assert_eq!(config.max_body_size, 2048);

            jail.set_env("PROFILES__BASE_URL", "http://10.0.2.2:3001/api");
            let config = load(Some(Path::new("profiles.yaml")), None).unwrap();
            assert_eq!(config.base_url, "http://10.0.2.2:3001/api");
            assert_eq!(config.max_body_size, 2048);

            let config = load(
                Some(Path::new("profiles.yaml")),
                Some("http://127.0.0.1:3001/api"),
            )
            .unwrap();
            assert_eq!(config.base_url, "http://127.0.0.1:3001/api");
            Ok(())
        });
    }

    #[test]
    fn test_missing_file_is_an_error() {
        Jail::expect_with(|_jail| {
            let err = load(Some(Path::new("nope.yaml")), None).unwrap_err();
            assert!(err.to_string().contains("does not exist"));
            Ok(())
        });
    }

    #[test]
    fn test_unknown_key_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("profiles.yaml", "timeout: 5\n")?;
            assert!(load(Some(Path::new("profiles.yaml")), None).is_err());
            Ok(())
        });
    }
}
