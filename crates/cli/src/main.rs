//! Command-line entry point for `gamefuzz`.
//!
//! All behavior lives in the `gamefuzz` library so it can be tested without
//! spawning the binary.

fn main() -> anyhow::Result<()> {
    gamefuzz::run()
}
