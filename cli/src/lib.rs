//! # CyberAdvisor Library
//!
//! File: cli/src/lib.rs
//!
//! ## Overview
//!
//! Library interface of the `cyberadvisor` crate. The binary (`main.rs`) is a
//! thin clap front end over these modules; integration tests in `tests/` use
//! them directly.
//!
//! - `advisor`: The response-resolution engine
//! - `commands`: Handlers for the `chat`, `ask` and `topics` commands
//! - `common`: Terminal, audio and process collaborators
//! - `core`: Configuration and error types
//!
pub mod advisor;
pub mod commands;
pub mod common;
pub mod core;
