//! Command-line front end for `gamefuzz`.
//!
//! `gamefuzz prepare` scores a raw catalog export, `gamefuzz recommend` ranks
//! it, `gamefuzz score` runs one inference (optionally explained) and
//! `gamefuzz rules` prints the active rule base. Settings come from
//! `~/.gamefuzz/config.toml`, the environment and flags, in increasing order
//! of precedence; see [`config`].

mod app;
/// Command-line argument definitions.
pub mod cli;
mod commands;
/// Configuration file loading and precedence.
pub mod config;

pub use app::{dispatch, run};
