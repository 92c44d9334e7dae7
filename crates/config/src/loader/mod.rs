//! Settings loader for environment variables and override files.
//!
//! Responsibilities:
//! - Read the recognized keys from an injectable [`EnvSource`].
//! - Layer the process environment over optional `.env` override files.
//! - Report every missing or blank required key in one error.
//!
//! Does NOT handle:
//! - Caching the validated settings (see `cache.rs`).
//!
//! Invariants / Assumptions:
//! - Variables already present in the environment take precedence over override files.
//! - Override files are best-effort: absent, unreadable, or malformed files are skipped.
//! - The `DOTENV_DISABLED` variable is checked before any override file is read.

mod builder;
mod dotenv;
mod error;
mod source;

pub use builder::ConfigLoader;
pub use error::ConfigError;
pub use source::{EnvSource, Layered, MapSource, ProcessEnv};

#[cfg(test)]
mod tests;
