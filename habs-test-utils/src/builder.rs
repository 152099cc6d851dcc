//! Declarative test builder.
//!
//! `TestBuilder` collects the tables and mock endpoints a test needs; everything queued is
//! executed by the final `build()` call.

use mockito::Mock;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{error::TestError, TestContext};

/// Groups of related tables, created in foreign key order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum TableGroup {
    User,
    Institution,
    Hostel,
    Booking,
    Ledger,
}

/// Builder for declarative test initialization.
pub struct TestBuilder {
    groups: Vec<TableGroup>,
    tables: Vec<TableCreateStatement>,

    mock_builders: Vec<Box<dyn FnOnce(&mut mockito::ServerGuard) -> Mock>>,
    token_endpoints: Vec<usize>,
    geocode_endpoints: Vec<(f64, f64, usize)>,
}

impl TestBuilder {
    /// Create a new TestBuilder with no tables or mock endpoints configured.
    pub fn new() -> Self {
        Self {
            groups: Vec::new(),
            tables: Vec::new(),
            mock_builders: Vec::new(),
            token_endpoints: Vec::new(),
            geocode_endpoints: Vec::new(),
        }
    }

    fn with_group(mut self, group: TableGroup) -> Self {
        if !self.groups.contains(&group) {
            self.groups.push(group);
        }
        self
    }

    /// Add the user account table.
    pub fn with_user_tables(self) -> Self {
        self.with_group(TableGroup::User)
    }

    /// Add university, college, and department tables.
    pub fn with_institution_tables(self) -> Self {
        self.with_group(TableGroup::Institution)
    }

    /// Add hostel and room type tables along with the user table they reference.
    pub fn with_hostel_tables(self) -> Self {
        self.with_user_tables().with_group(TableGroup::Hostel)
    }

    /// Add booking and status history tables along with every table they reference.
    pub fn with_booking_tables(self) -> Self {
        self.with_hostel_tables().with_group(TableGroup::Booking)
    }

    /// Add every table of the schema.
    pub fn with_all_tables(self) -> Self {
        self.with_booking_tables()
            .with_institution_tables()
            .with_group(TableGroup::Ledger)
    }

    /// Add a single entity table to the test database.
    ///
    /// Chain multiple calls to add multiple tables; they are created after any table groups.
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Add a mock OAuth token endpoint to the map provider.
    ///
    /// # Arguments
    /// - `expected_requests` - Number of times this endpoint should be called
    pub fn with_map_token_endpoint(mut self, expected_requests: usize) -> Self {
        self.token_endpoints.push(expected_requests);
        self
    }

    /// Add a mock geocoding endpoint answering with the given coordinates.
    pub fn with_geocode_endpoint(
        mut self,
        latitude: f64,
        longitude: f64,
        expected_requests: usize,
    ) -> Self {
        self.geocode_endpoints
            .push((latitude, longitude, expected_requests));
        self
    }

    /// Add a custom mock endpoint with full control.
    ///
    /// Custom endpoints are created before the pre-configured ones so tests can layer an error
    /// response in front of a successful one for the same path.
    pub fn with_mock_endpoint<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut mockito::ServerGuard) -> Mock + 'static,
    {
        self.mock_builders.push(Box::new(setup));
        self
    }

    /// Build the test context by creating all configured tables and mock endpoints.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully configured test environment ready for use
    /// - `Err(TestError::DbErr)` - Database connection or table creation failed
    pub async fn build(mut self) -> Result<TestContext, TestError> {
        let mut context = TestContext::new().await?;

        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        let mut all_tables = Vec::new();

        self.groups.sort();
        for group in &self.groups {
            match group {
                TableGroup::User => {
                    all_tables.push(schema.create_table_from_entity(entity::prelude::HabsUser));
                }
                TableGroup::Institution => all_tables.extend([
                    schema.create_table_from_entity(entity::prelude::University),
                    schema.create_table_from_entity(entity::prelude::College),
                    schema.create_table_from_entity(entity::prelude::Department),
                ]),
                TableGroup::Hostel => all_tables.extend([
                    schema.create_table_from_entity(entity::prelude::Hostel),
                    schema.create_table_from_entity(entity::prelude::HostelRoomType),
                ]),
                TableGroup::Booking => all_tables.extend([
                    schema.create_table_from_entity(entity::prelude::Booking),
                    schema.create_table_from_entity(entity::prelude::BookingStatusHistory),
                ]),
                TableGroup::Ledger => {
                    all_tables.push(schema.create_table_from_entity(entity::prelude::LedgerEntry));
                }
            }
        }

        all_tables.extend(self.tables);
        context.with_tables(all_tables).await?;

        let mut mocks = Vec::new();

        for builder in self.mock_builders {
            mocks.push(builder(&mut context.server));
        }

        for expected in self.token_endpoints {
            mocks.push(context.map().create_token_endpoint(expected));
        }

        for (latitude, longitude, expected) in self.geocode_endpoints {
            mocks.push(
                context
                    .map()
                    .create_geocode_endpoint(latitude, longitude, expected),
            );
        }

        context.mocks = mocks;

        Ok(context)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
