//! CLI handler for the `prepare` command.

use anyhow::{Context, Result};
use gamefuzz_catalog::{load_raw_catalog, prepare, save_prepared};
use std::path::Path;

/// Handle the `prepare` command.
pub(crate) fn handle_prepare_command(input: &Path, output: &Path) -> Result<()> {
    let count = prepare_catalog(input, output)?;
    println!(
        "Prepared {} games from {} into {}",
        count,
        input.display(),
        output.display()
    );
    Ok(())
}

/// Load, score and save a catalog. Returns the number of records written.
pub(crate) fn prepare_catalog(input: &Path, output: &Path) -> Result<usize> {
    let raw = load_raw_catalog(input)
        .with_context(|| format!("failed to load raw catalog {}", input.display()))?;
    let records = prepare(raw);
    save_prepared(output, &records)?;
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamefuzz_catalog::load_prepared;
    use gamefuzz_test_utils::TestFixture;

    #[test]
    fn prepares_sample_catalog() {
        let fixture = TestFixture::new().unwrap();
        let raw = fixture.write_sample_catalog().unwrap();
        let out = fixture.prepared_path();

        assert_eq!(prepare_catalog(&raw, &out).unwrap(), 4);
        assert_eq!(load_prepared(&out).unwrap().len(), 4);
    }

    #[test]
    fn missing_input_mentions_path() {
        let fixture = TestFixture::new().unwrap();
        let missing = fixture.data_dir.join("nope.json");
        let err = prepare_catalog(&missing, &fixture.prepared_path()).unwrap_err();
        assert!(format!("{err:#}").contains("nope.json"));
    }
}
