//! Test fixture modules for database rows and mock HTTP endpoints.
//!
//! - `user` - student, hostel owner, and admin accounts
//! - `institution` - universities, colleges, and departments
//! - `hostel` - hostel listings and their room types
//! - `booking` - booking requests with an initial status history entry
//! - `map` - map provider endpoints on the mock server

pub mod booking;
pub mod hostel;
pub mod institution;
pub mod map;
pub mod user;
