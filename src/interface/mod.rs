//! # Interface Layer
//!
//! Command handlers exposed to chat users.

pub mod commands;
