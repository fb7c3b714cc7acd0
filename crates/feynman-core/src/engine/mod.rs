//! # Engine Module
//!
//! The stateful algorithms of FeynmanDAG.
//!
//! - **Branch Calculation** ([`algorithm`]) - Enumerates fusion orders, one branch per diagram
//! - **Replay** ([`replay`]) - Applies a branch's operations with a vertex rule
//! - **Diagrams** ([`diagram`]) - Undirected graph of a single diagram
//! - **Matrix Elements** ([`matrix_element`]) - Numeric amplitude of a single diagram
//! - **Compute Graph** ([`compute_graph`]) - Directed graph over all branches with a shared sum node
//! - **Configuration** ([`config`]), **Progress** ([`progress`]) and **Errors** ([`error`])

pub mod algorithm;
pub mod compute_graph;
pub mod config;
pub mod diagram;
pub mod error;
pub mod graph;
pub mod ids;
pub mod matrix_element;
pub mod progress;
pub mod replay;
