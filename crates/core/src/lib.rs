//! Core library for siteforge
//!
//! This crate implements the **Functional Core** of the siteforge application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! - **`siteforge_core`** (this crate): pure transformation functions with zero I/O
//! - **`siteforge`**: I/O operations and orchestration (the Imperative Shell)
//!
//! All functions in this crate are deterministic and free of side effects, so
//! they can be tested with simple fixture data and no mocking.
//!
//! # Module Organization
//!
//! - [`project`]: parsing and naming for generated website projects
//! - [`openrouter`]: request/response shapes for the chat-completions API
//! - [`github`]: payload construction and status classification for the
//!   GitHub REST API

pub mod github;
pub mod openrouter;
pub mod project;
