//! Server application models and type definitions.
//!
//! This module contains the shared application state, database model type aliases, and the
//! bearer-token claims and request extractors used to authenticate API calls.

pub mod app;
pub mod auth;
pub mod db;
