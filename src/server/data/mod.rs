//! Data access layer repositories.
//!
//! Repositories wrap sea-orm queries per aggregate. Each is generic over [`ConnectionTrait`] so
//! the same code runs against the pool or inside a transaction.
//!
//! [`ConnectionTrait`]: sea_orm::ConnectionTrait

pub mod booking;
pub mod hostel;
pub mod institution;
pub mod ledger;
pub mod user;

use migration::{Expr, Func};
use sea_orm::{ColumnTrait, ExprTrait};

/// Case-insensitive substring match of `column` against `term`.
///
/// Lower-cases both sides so the filter behaves the same on Postgres and SQLite.
pub(crate) fn contains_ignore_case<C: ColumnTrait>(column: C, term: &str) -> Expr {
    let pattern = format!("%{}%", term.trim().to_lowercase());

    Expr::expr(Func::lower(Expr::col(column))).like(pattern)
}

/// Converts a 1-based page number to the 0-based index sea-orm paginators expect.
pub(crate) fn page_index(page: u64) -> u64 {
    page.saturating_sub(1)
}
