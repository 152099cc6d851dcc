//! Server application core modules.
//!
//! This module contains all server-side functionality for HABS, including HTTP routing,
//! bearer-token authentication, database access, the booking lifecycle, hostel search and
//! recommendations, map provider integration, real-time notifications, and the optional
//! booking ledger and auto-cancel sweep.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod util;
