//! dermalink-engine
//!
//! The algorithmic core of the recommendation pipeline. Pure functions of
//! (profile, catalog snapshot) — no I/O, no AWS dependency. Identical inputs
//! produce byte-identical rankings; everything nondeterministic (model
//! calls, storage, clocks) lives in other crates.

pub mod error;
pub mod filter;
pub mod normalize;
pub mod provider_match;
pub mod ranker;
pub mod rationale;
pub mod rules;

pub use ranker::{RankerConfig, rank};
