//! Dockerfile parsing and normalization for kubefy.
//!
//! # Pipeline
//!
//! ```text
//! Dockerfile text
//!   1. Parse      ── Dockerfile::parse()        → ordered Instructions
//!   2. Normalize  ── normalize() / from_dockerfile() → ContainerDescription
//! ```
//!
//! Only FROM, WORKDIR, EXPOSE, ENV, CMD and ENTRYPOINT affect the result.
//! Every other instruction is kept as [`Directive::Unmapped`].

pub mod instruction;
pub mod normalize;
pub mod parser;
mod words;

pub use instruction::{Directive, ExposedPort, Instruction, InstructionKind, Protocol};
pub use normalize::{ContainerDescription, Environment, normalize};
pub use parser::Dockerfile;
