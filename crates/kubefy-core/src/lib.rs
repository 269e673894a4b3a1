//! Core types and configuration for kubefy.
//!
//! This crate defines the run configuration ([`RunConfiguration`]), the
//! optional `kubefy.toml` schema ([`KubefyConfig`]), name and path
//! validation, and the error taxonomy shared by every other crate.

pub mod config;
pub mod error;
pub mod validate;

pub use config::{DeploymentSettings, KubefyConfig, RunConfiguration, ServiceType};
pub use error::{Error, ErrorCategory, Result, UnsupportedFeature};
