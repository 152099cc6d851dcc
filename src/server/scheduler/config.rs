pub mod booking {
    /// Cron expression for the unanswered request sweep
    /// Runs every 15 minutes on the quarter hour
    pub const EXPIRY_CRON_EXPRESSION: &str = "0 */15 * * * *";
}
