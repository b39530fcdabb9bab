//! Core homeroom library (auth, session lifecycle, config).

pub mod auth;
pub mod config;
