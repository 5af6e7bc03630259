//! Remote advertising platform integration: statistics and pause actions
//! over the platform's JSON API.

pub mod api;
pub mod client;
pub mod dry_run;

pub use client::DirectClient;
pub use dry_run::DryRunActions;
