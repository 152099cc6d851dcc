//! HABS: hostel availability and booking service.
//!
//! Students search and book hostel beds near their institution, hostel owners list properties
//! and respond to booking requests, and administrators moderate listings and accounts.

pub mod model;
pub mod server;
