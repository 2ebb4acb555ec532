//! Command implementations
//!
//! Each command builds a client from the loaded config, performs its calls in
//! order, and prints the result. Errors propagate to `main`, which prints them
//! and exits non-zero.

mod auth_url;
mod create;
mod fetch;
mod manage;

pub use auth_url::auth_url;
pub use create::{CreateRequest, create};
pub use fetch::fetch;
pub use manage::{ManageRequest, manage};
