//! Configuration file support for gamefuzz.
//!
//! Loads settings from `~/.gamefuzz/config.toml` (or the file named by
//! `GAMEFUZZ_CONFIG`) with the following precedence:
//! CLI arguments > Environment variables > Config file
//!
//! Environment variables are read by clap alongside their flags, so by the
//! time [`Config::resolve`] runs an override is simply "present or not".
//!
//! ## Configuration File Format
//!
//! ```toml
//! # ~/.gamefuzz/config.toml
//!
//! [engine]
//! # Samples over [0, 100]; 2 to 1000001
//! resolution = 101
//! # "centroid" or "trapezoid"
//! defuzzification = "centroid"
//!
//! # Triangle overrides, by variable and label
//! [engine.sets.kualitas]
//! tinggi = [70.0, 100.0, 100.0]
//!
//! # Replaces the built-in rule table when present
//! [[engine.rules]]
//! when = [["kualitas", "tinggi"], ["harga", "murah"]]
//! then = "kuat"
//!
//! [recommend]
//! limit = 20
//! idr_per_usd = 15500.0
//! ```

use anyhow::{bail, Context, Result};
use gamefuzz_catalog::{DEFAULT_LIMIT, IDR_PER_USD};
use gamefuzz_engine::{Defuzzification, EngineSpec};
use serde::Deserialize;
use std::path::PathBuf;

/// Environment variable naming an alternative config file.
pub const ENV_CONFIG_PATH: &str = "GAMEFUZZ_CONFIG";

/// Top-level configuration structure.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Membership sets, rule table and inference options.
    #[serde(default)]
    pub engine: EngineSpec,
    /// Recommendation defaults.
    #[serde(default)]
    pub recommend: RecommendConfig,
}

/// Configuration for the recommend command.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecommendConfig {
    /// Games shown when `--limit` is absent.
    pub limit: Option<usize>,
    /// Exchange rate for Rupiah budgets and prices.
    pub idr_per_usd: Option<f64>,
}

/// Values given on the command line or through the environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    /// `--resolution` / `GAMEFUZZ_RESOLUTION`.
    pub resolution: Option<usize>,
    /// `--defuzz` / `GAMEFUZZ_DEFUZZ`.
    pub defuzzification: Option<Defuzzification>,
    /// `--limit` / `GAMEFUZZ_LIMIT`.
    pub limit: Option<usize>,
}

/// Fully resolved settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Engine description to build the rule base from.
    pub engine: EngineSpec,
    /// Recommendations to show.
    pub limit: usize,
    /// Rupiah per US dollar.
    pub idr_per_usd: f64,
}

impl Config {
    /// Layer `overrides` on top of the file values and fill in defaults.
    pub fn resolve(self, overrides: Overrides) -> Result<Settings> {
        let mut engine = self.engine;
        if overrides.resolution.is_some() {
            engine.resolution = overrides.resolution;
        }
        if overrides.defuzzification.is_some() {
            engine.defuzzification = overrides.defuzzification;
        }

        let idr_per_usd = self.recommend.idr_per_usd.unwrap_or(IDR_PER_USD);
        if !(idr_per_usd.is_finite() && idr_per_usd > 0.0) {
            bail!("[recommend] idr_per_usd must be a positive number, got {idr_per_usd}");
        }

        Ok(Settings {
            engine,
            limit: overrides
                .limit
                .or(self.recommend.limit)
                .unwrap_or(DEFAULT_LIMIT),
            idr_per_usd,
        })
    }
}

/// Returns the path to the config file: `$GAMEFUZZ_CONFIG`, else
/// `~/.gamefuzz/config.toml`.
fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(ENV_CONFIG_PATH).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    dirs::home_dir().map(|h| h.join(".gamefuzz").join("config.toml"))
}

/// Loads the configuration file if it exists.
///
/// Returns `Ok(None)` if the file doesn't exist.
/// Returns `Err` if the file exists but fails to parse.
pub fn load_config() -> Result<Option<Config>> {
    let Some(path) = config_path() else {
        return Ok(None);
    };

    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("invalid config file {}", path.display()))?;

    tracing::debug!(
        target: "gamefuzz::config",
        path = %path.display(),
        "Loaded configuration file"
    );

    Ok(Some(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamefuzz_test_utils::{env_guard, set_env_var, TestFixture};

    #[test]
    fn config_path_defaults_to_home() {
        let _g = env_guard();
        let fixture = TestFixture::new().unwrap();
        let _home = fixture.home_guard();
        let _cfg = set_env_var(ENV_CONFIG_PATH, None);

        let path = config_path().unwrap();
        assert!(path.ends_with(".gamefuzz/config.toml"));
        assert!(path.starts_with(fixture.home_path()));
    }

    #[test]
    fn config_path_env_override() {
        let _g = env_guard();
        let _cfg = set_env_var(ENV_CONFIG_PATH, Some("/tmp/elsewhere.toml"));
        assert_eq!(config_path(), Some(PathBuf::from("/tmp/elsewhere.toml")));
    }

    #[test]
    fn parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.engine, EngineSpec::default());
        assert!(config.recommend.limit.is_none());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
            [engine]
            resolution = 201
            defuzzification = "trapezoid"

            [engine.sets.kualitas]
            tinggi = [60.0, 100.0, 100.0]

            [[engine.rules]]
            when = [["kualitas", "tinggi"]]
            then = "kuat"

            [[engine.rules]]
            name = "fallback"
            when = [["kualitas", "rendah"]]
            then = "lemah"

            [recommend]
            limit = 5
            idr_per_usd = 16000.0
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.engine.resolution, Some(201));
        assert_eq!(
            config.engine.defuzzification,
            Some(Defuzzification::Trapezoid)
        );
        assert_eq!(
            config.engine.sets["kualitas"]["tinggi"],
            [60.0, 100.0, 100.0]
        );
        let rules = config.engine.rules.as_ref().unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[1].name.as_deref(), Some("fallback"));
        assert_eq!(config.recommend.limit, Some(5));

        let rule_base = config.engine.build().unwrap();
        assert_eq!(rule_base.rules().len(), 2);
    }

    #[test]
    fn unknown_section_is_rejected() {
        assert!(toml::from_str::<Config>("[serve]\nhttp = \"x\"\n").is_err());
    }

    #[test]
    fn misspelled_engine_key_is_rejected() {
        let err = toml::from_str::<Config>("[engine]\nresoluton = 11\n").unwrap_err();
        assert!(err.to_string().contains("resoluton"));
    }

    #[test]
    fn overrides_beat_file_values() {
        let config: Config = toml::from_str(
            "[engine]\nresolution = 51\n[recommend]\nlimit = 7\n",
        )
        .unwrap();
        let settings = config
            .resolve(Overrides {
                resolution: Some(201),
                defuzzification: Some(Defuzzification::Trapezoid),
                limit: Some(3),
            })
            .unwrap();
        assert_eq!(settings.engine.resolution, Some(201));
        assert_eq!(
            settings.engine.defuzzification,
            Some(Defuzzification::Trapezoid)
        );
        assert_eq!(settings.limit, 3);
    }

    #[test]
    fn file_values_beat_defaults() {
        let config: Config = toml::from_str("[recommend]\nlimit = 7\n").unwrap();
        let settings = config.resolve(Overrides::default()).unwrap();
        assert_eq!(settings.limit, 7);
        assert_eq!(settings.idr_per_usd, IDR_PER_USD);
        assert!(settings.engine.resolution.is_none());

        let settings = Config::default().resolve(Overrides::default()).unwrap();
        assert_eq!(settings.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn rejects_non_positive_exchange_rate() {
        let config: Config = toml::from_str("[recommend]\nidr_per_usd = 0.0\n").unwrap();
        assert!(config.resolve(Overrides::default()).is_err());
    }

    #[test]
    fn load_reads_file_from_env_path() {
        let _g = env_guard();
        let fixture = TestFixture::new().unwrap();
        let path = fixture
            .write_config("[recommend]\nlimit = 4\n")
            .unwrap();
        let path = path.to_string_lossy().into_owned();
        let _cfg = set_env_var(ENV_CONFIG_PATH, Some(&path));

        let config = load_config().unwrap().unwrap();
        assert_eq!(config.recommend.limit, Some(4));
    }

    #[test]
    fn load_missing_file_returns_none() {
        let _g = env_guard();
        let fixture = TestFixture::new().unwrap();
        let _home = fixture.home_guard();
        let _cfg = set_env_var(ENV_CONFIG_PATH, None);

        assert!(load_config().unwrap().is_none());
    }

    #[test]
    fn load_malformed_file_is_error() {
        let _g = env_guard();
        let fixture = TestFixture::new().unwrap();
        fixture.write_config("[engine\nresolution = ").unwrap();
        let _home = fixture.home_guard();
        let _cfg = set_env_var(ENV_CONFIG_PATH, None);

        assert!(load_config().is_err());
    }
}
