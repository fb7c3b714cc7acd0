//! # Workflows Module
//!
//! End-to-end entry points that tie the `engine` and `core` layers together.
//!
//! - **Generation Workflow** ([`generate`]) - From a process definition to branches,
//!   diagram graphs, the compute graph and, optionally, the evaluated amplitudes.

pub mod generate;
