#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![cfg_attr(feature = "fail-on-warnings", deny(clippy::all))]

pub mod amount;
pub mod app;
pub mod auth;
pub mod cli;
mod macros;
pub mod points;
pub mod primitives;
pub mod scoring;
pub mod settlement;
mod tracing;
pub mod wallet_gateway;
