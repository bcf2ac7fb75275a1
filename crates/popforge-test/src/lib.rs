//! Shared test fixtures for PopForge crates.
//!
//! This crate provides projection builders for testing. It depends only on
//! `popforge-core` so every other crate can use it as a dev-dependency.
//!
//! - [`assignment`] - candidate list helpers
//! - [`scenario`] - ready-made projections with known combination counts
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! popforge-test = { workspace = true }
//! ```
//!
//! ```ignore
//! use popforge_test::scenario::{three_set_types, SCENARIO_B_COMBINATIONS};
//! ```

pub mod assignment;
pub mod scenario;

pub use assignment::{assignments, shared};
