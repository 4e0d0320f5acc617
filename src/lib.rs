//! Mint Editor - desktop editor application shell
//!
//! This library provides the session logger and the application lifecycle
//! that drives the editor loop.

pub mod app;
pub mod config;
pub mod editor;
pub mod logging;
