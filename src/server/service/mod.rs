//! Service layer for business logic and orchestration.
//!
//! Services coordinate repositories, the map provider, and the notification hub. They cover
//! authentication, account profiles, the institution catalog, hostel listings and search, the
//! booking lifecycle, administration, and booking term fingerprints.

pub mod admin;
pub mod auth;
pub mod booking;
pub mod hostel;
pub mod institution;
pub mod ledger;
pub mod map;
pub mod notification;
pub mod user;
