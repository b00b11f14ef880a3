pub mod api;
pub mod attribute;
pub mod aws;
pub mod config;
pub mod discovery;
pub mod ec2_volume_client;
pub mod error;
pub mod evaluation;
pub mod model;
pub mod record_store;
pub mod sts_client;
pub mod telemetry;
pub mod workflow;

#[cfg(test)]
pub(crate) mod testing;
