//! Shared test utilities for gamefuzz crates.
//!
//! Environment guards for tests that touch process-wide variables, plus a
//! fixture that lays out a throwaway home directory with catalog and config
//! files.

use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};

/// A small raw catalog covering the interesting shapes: a loved free game,
/// an expensive unpopular one, a middling one, a record with sloppy fields
/// and an unnamed record that preparation must drop.
pub const SAMPLE_RAW_CATALOG: &str = r#"{
    "100": {
        "name": "Loved Freebie",
        "price": 0.0,
        "release_date": "Mar 3, 2020",
        "positive": 9800,
        "negative": 200,
        "estimated_owners": "1,000,000 - 2,000,000",
        "peak_ccu": 25000,
        "genres": ["Indie", "Casual"],
        "categories": ["Single-player"],
        "tags": {"Cozy": 120, "Relaxing": 80}
    },
    "200": {
        "name": "Pricey Flop",
        "price": 59.99,
        "release_date": "Nov 11, 2016",
        "positive": 40,
        "negative": 360,
        "estimated_owners": "0 - 20,000",
        "peak_ccu": 3,
        "genres": ["Action"],
        "categories": ["Multi-player"]
    },
    "300": {
        "name": "Middle Road",
        "price": 19.99,
        "release_date": "2018-06-01",
        "positive": 650,
        "negative": 350,
        "estimated_owners": "50,000 - 100,000",
        "peak_ccu": 400,
        "genres": ["Indie", "RPG"],
        "categories": ["Single-player"]
    },
    "400": {
        "name": "Sloppy Entry",
        "price": "4.99",
        "release_date": "Coming soon",
        "positive": "n/a",
        "negative": null,
        "genres": "Indie"
    },
    "500": {
        "price": 1.0
    }
}"#;

/// Serialize tests that mutate process-global state (env vars, cwd, etc).
///
/// Acquire this guard at the start of any test that modifies environment
/// variables to prevent race conditions between parallel tests.
pub fn env_guard() -> MutexGuard<'static, ()> {
    static TEST_SERIAL: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
    TEST_SERIAL.lock().unwrap_or_else(|e| e.into_inner())
}

/// RAII guard for an environment variable; restores the original value on drop.
pub struct EnvVarGuard {
    key: &'static str,
    previous: Option<String>,
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        match &self.previous {
            Some(v) => std::env::set_var(self.key, v),
            None => std::env::remove_var(self.key),
        }
    }
}

/// Set (or with `None`, remove) an environment variable until the guard drops.
///
/// ```
/// let _guard = gamefuzz_test_utils::set_env_var("GAMEFUZZ_DOC_VAR", Some("7"));
/// assert_eq!(std::env::var("GAMEFUZZ_DOC_VAR").as_deref(), Ok("7"));
/// ```
pub fn set_env_var(key: &'static str, value: Option<&str>) -> EnvVarGuard {
    let previous = std::env::var(key).ok();
    match value {
        Some(val) => std::env::set_var(key, val),
        None => std::env::remove_var(key),
    }
    EnvVarGuard { key, previous }
}

/// Throwaway home directory with a `data/` folder for catalog files.
///
/// Everything is removed when the fixture drops.
pub struct TestFixture {
    pub tempdir: tempfile::TempDir,
    /// `$HOME/data` in the temp environment.
    pub data_dir: PathBuf,
}

impl TestFixture {
    /// Create the fixture. Does not touch `HOME`; see [`TestFixture::home_guard`].
    pub fn new() -> std::io::Result<Self> {
        let tempdir = tempfile::tempdir()?;
        let data_dir = tempdir.path().join("data");
        std::fs::create_dir_all(&data_dir)?;
        Ok(Self { tempdir, data_dir })
    }

    /// The path to use as `HOME`.
    pub fn home_path(&self) -> &Path {
        self.tempdir.path()
    }

    /// Point `HOME` at this fixture until the guard drops.
    pub fn home_guard(&self) -> EnvVarGuard {
        set_env_var("HOME", Some(&self.home_path().to_string_lossy()))
    }

    /// Where a prepared catalog would be written.
    pub fn prepared_path(&self) -> PathBuf {
        self.data_dir.join("prepared.json")
    }

    /// Write [`SAMPLE_RAW_CATALOG`] and return its path.
    pub fn write_sample_catalog(&self) -> std::io::Result<PathBuf> {
        self.write_raw_catalog("games.json", SAMPLE_RAW_CATALOG)
    }

    /// Write a raw catalog under `data/`.
    pub fn write_raw_catalog(&self, file: &str, json: &str) -> std::io::Result<PathBuf> {
        let path = self.data_dir.join(file);
        std::fs::write(&path, json)?;
        Ok(path)
    }

    /// Write `$HOME/.gamefuzz/config.toml` and return its path.
    pub fn write_config(&self, toml: &str) -> std::io::Result<PathBuf> {
        let dir = self.home_path().join(".gamefuzz");
        std::fs::create_dir_all(&dir)?;
        let path = dir.join("config.toml");
        std::fs::write(&path, toml)?;
        Ok(path)
    }
}
