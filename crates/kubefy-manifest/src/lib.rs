//! Kubernetes manifest synthesis, rendering, and output for kubefy.
//!
//! # Pipeline
//!
//! ```text
//! ContainerDescription + RunConfiguration
//!   1. Synthesize ── synthesize()          → Deployment (+ Service if ports)
//!   2. Render     ── Manifests::render()   → deployment.yaml, service.yaml
//!   3. Output     ── write_manifests()     → files, all or nothing
//!                    Manifests::to_documents() → one `---` separated stream (dry run)
//! ```
//!
//! Rendering is deterministic: identical input always yields byte-identical
//! YAML.

pub mod error;
pub mod render;
pub mod resource;
pub mod synthesize;
pub mod write;

pub use error::ManifestError;
pub use render::{DEPLOYMENT_FILE, RenderedManifest, SERVICE_FILE};
pub use resource::{Deployment, Manifests, Service};
pub use synthesize::synthesize;
pub use write::write_manifests;
