//! pipsolve - Python dependency resolver library
//!
//! This library resolves a set of Python package requirements into a
//! pinned, mutually compatible version set:
//! - PyPI-style version and constraint handling
//! - Concurrent metadata fetching with retry and coalescing
//! - Breadth-first resolution with configurable conflict strategies
//! - requirements.txt and environment script generation

pub mod cli;
pub mod domain;
pub mod error;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod registry;
pub mod resolver;
pub mod scripts;
