//! trello-cards - create, fetch, and update Trello cards from the command line
//!
//! The library holds a thin synchronous Trello REST client, the handful of
//! card operations built on it, and text renderings of card JSON for use as
//! working context.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cards;
pub mod client;
pub mod config;
pub mod format;
pub mod output;
pub mod paths;
