//! Topograph Core Types and Definitions
//!
//! This crate provides the foundational types for Topograph network diagrams.
//! It includes:
//!
//! - **Configuration**: Topology document definitions ([`config`] module)
//! - **Styles**: Direction, output format and edge style enums ([`style`] module)
//! - **Graph**: The hierarchical graph model and the [`graph::DiagramContext`]
//!   scope the builders emit into ([`graph`] module)

pub mod config;
pub mod graph;
pub mod style;
