pub mod adapters;
pub mod config;
pub mod domain;

pub use {
    adapters::apsan::{DRIVER_NAME, TransactionAdapter, messages::MessageTable},
    adapters::apsan_client::HttpGatewayClient,
    config::GatewaySettings,
    domain::{driver::Driver, error::GatewayError},
};
