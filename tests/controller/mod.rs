//! Integration tests for HTTP controller endpoints.
//!
//! Requests go through the full router so extractors, role guards, and error responses are
//! exercised the way a client sees them.

mod admin;
mod auth;
mod booking;
mod health;
mod hostel;
mod institution;
mod ledger;
mod map;

use axum::http::{Method, StatusCode};
use habs_test_utils::prelude::*;
use serde_json::{json, Value};

use crate::util::{get, json_body, request, send, TestContextExt};
