//! # Core Module
//!
//! Stateless building blocks of FeynmanDAG.
//!
//! - **Particles** ([`particles`]) - The species of the ABC model, symbolic particles and numeric states
//! - **Model Parameters** ([`model`]) - Masses and coupling, loadable from TOML
//! - **Vertex Rules** ([`interaction`]) - Fusion and closure of legs, symbolic and numeric
//! - **Kinematics** ([`kinematics`]) - Lorentz vectors, four-momenta, Dirac algebra and spinors
//! - **File I/O** ([`io`]) - Process files, DOT output and amplitude tables

pub mod interaction;
pub mod io;
pub mod kinematics;
pub mod model;
pub mod particles;
pub mod utils;
