//! # FeynmanDAG Core Library
//!
//! Generation of tree-level Feynman diagrams, their matrix elements and a
//! compute graph that shares intermediate particles between diagrams, for the
//! scalar ABC model.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models: particles and
//!   species, model parameters, vertex rules, relativistic kinematics and file I/O.
//!
//! - **[`engine`]: The Logic Core.** Branch calculation, the replay of
//!   operations with symbolic or numeric vertex rules, and the diagram and
//!   compute graphs built from them.
//!
//! - **[`workflows`]: The Public API.** Complete procedures that take a
//!   process definition and produce every artifact in one call.

pub mod core;
pub mod engine;
pub mod workflows;
