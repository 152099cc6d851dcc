//! Scheduler for periodic booking maintenance.
//!
//! When enabled, a cron job cancels pending booking requests that the hostel owner left
//! unanswered past their response deadline, notifying both parties of each cancellation.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    error::Error,
    service::{booking::BookingService, notification::NotificationHub},
};

pub mod config;

use self::config::booking as booking_config;

/// Job scheduler for background booking maintenance.
pub struct Scheduler {
    db: DatabaseConnection,
    notifier: NotificationHub,
    sched: JobScheduler,
}

impl Scheduler {
    /// Creates a new instance of [`Scheduler`].
    ///
    /// # Returns
    /// - `Ok(Scheduler)` - Successfully created scheduler instance
    /// - `Err(Error)` - Failed to initialize the underlying job scheduler
    pub async fn new(db: DatabaseConnection, notifier: NotificationHub) -> Result<Self, Error> {
        let sched = JobScheduler::new().await?;
        Ok(Self {
            db,
            notifier,
            sched,
        })
    }

    /// Registers the booking expiry sweep and starts the scheduler.
    ///
    /// Returns the running [`JobScheduler`], which must be kept alive for jobs to keep firing.
    pub async fn start(mut self) -> Result<JobScheduler, Error> {
        self.schedule_job(
            booking_config::EXPIRY_CRON_EXPRESSION,
            "booking expiry",
            expire_pending_bookings,
        )
        .await?;

        self.sched.start().await?;

        Ok(self.sched)
    }

    /// Schedules a recurring job with the specified cron expression.
    ///
    /// The job logs how many records it handled, or the error that stopped it.
    pub async fn schedule_job<F, Fut>(
        &mut self,
        cron: &str,
        name: &str,
        function: F,
    ) -> Result<(), Error>
    where
        F: Fn(DatabaseConnection, NotificationHub) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<usize, Error>> + Send + 'static,
    {
        let db = self.db.clone();
        let notifier = self.notifier.clone();
        let name = name.to_string();
        let function = Arc::new(function);

        self.sched
            .add(Job::new_async(cron, move |_, _| {
                let db = db.clone();
                let notifier = notifier.clone();
                let name = name.clone();
                let function = Arc::clone(&function);

                Box::pin(async move {
                    match function(db, notifier).await {
                        Ok(count) => tracing::debug!("Ran {} job on {} record(s)", name, count),
                        Err(e) => tracing::error!("Error running {} job: {:?}", name, e),
                    }
                })
            })?)
            .await?;

        Ok(())
    }
}

async fn expire_pending_bookings(
    db: DatabaseConnection,
    notifier: NotificationHub,
) -> Result<usize, Error> {
    BookingService::new(&db, &notifier)
        .expire_pending(Utc::now().naive_utc())
        .await
}
