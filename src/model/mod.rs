//! Request and response payloads shared by the HTTP API.

pub mod admin;
pub mod api;
pub mod booking;
pub mod hostel;
pub mod institution;
pub mod ledger;
pub mod map;
pub mod notification;
pub mod user;
