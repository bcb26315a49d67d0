//! Embedded PostgreSQL fixtures for the Diesel repository suites.
//!
//! Every suite shares one cluster per test binary. A template database is
//! migrated once per migration-set hash, and each test clones it into a fresh
//! temporary database so tests never observe each other's rows.
//!
//! Set `SKIP_TEST_CLUSTER=1` to skip these suites where PostgreSQL cannot be
//! bootstrapped. Without it, a setup failure fails the test.

#![allow(dead_code, reason = "each suite uses a subset of the helpers")]

use std::future::Future;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use pg_embedded_setup_unpriv::test_support::{hash_directory, shared_cluster_handle};
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use postgres::types::ToSql;
use postgres::{Client, NoTls};
use tender_backend::domain::{OrganizationId, TenderId, UserId};
use tender_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use tokio::runtime::Runtime;
use uuid::Uuid;

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const TEMPLATE_NAME_PREFIX: &str = "tender_template";
const PROVISION_RETRIES: usize = 5;
const PROVISION_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Render a `postgres` error with its SQLSTATE and message.
///
/// `Display` collapses server errors to `db error`, which hides the cause.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };
    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

/// Whether `SKIP_TEST_CLUSTER` is set to "1", "true" or "yes".
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip with a marker when allowed, otherwise fail loudly.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

fn migrations_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations")
}

fn template_database_name() -> Result<String, String> {
    let hash = hash_directory(migrations_dir()).map_err(|err| format!("hash migrations: {err}"))?;
    let short_hash = hash.get(..8).unwrap_or(&hash);
    Ok(format!("{TEMPLATE_NAME_PREFIX}_{short_hash}"))
}

/// Create the migrated template database unless it already exists.
fn ensure_template_database(cluster: &ClusterHandle, runtime: &Runtime) -> Result<String, String> {
    let template_name = template_database_name()?;
    let _lock = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let exists = cluster
        .database_exists(template_name.as_str())
        .map_err(|err| format!("template check: {err:?}"))?;
    if !exists {
        cluster
            .create_database(template_name.as_str())
            .map_err(|err| format!("create template: {err:?}"))?;
        let url = cluster.connection().database_url(&template_name);
        runtime
            .block_on(run_pending_migrations(url))
            .map_err(|err| format!("migrate template: {err}"))?;
    }
    Ok(template_name)
}

fn provision_database(
    cluster: &ClusterHandle,
    runtime: &Runtime,
) -> Result<TemporaryDatabase, String> {
    let mut last_error = String::from("no provisioning attempt ran");
    for attempt in 1..=PROVISION_RETRIES {
        let outcome = ensure_template_database(cluster, runtime).and_then(|template| {
            let name = format!("test_{}", Uuid::new_v4().simple());
            cluster
                .temporary_database_from_template(name.as_str(), template.as_str())
                .map_err(|err| format!("create database from template: {err:?}"))
        });
        match outcome {
            Ok(database) => return Ok(database),
            Err(error) => last_error = format!("attempt {attempt}/{PROVISION_RETRIES}: {error}"),
        }
        if attempt < PROVISION_RETRIES {
            std::thread::sleep(PROVISION_RETRY_DELAY);
        }
    }
    Err(last_error)
}

/// A migrated temporary database with a pool and the runtime that drives it.
pub struct PostgresContext {
    runtime: Runtime,
    pool: DbPool,
    database_url: String,
    _database: TemporaryDatabase,
}

impl PostgresContext {
    fn setup() -> Result<Self, String> {
        let runtime = Runtime::new().map_err(|err| err.to_string())?;
        let cluster = shared_cluster_handle().map_err(|err| format!("{err:?}"))?;
        let database = provision_database(cluster, &runtime)?;
        let database_url = database.url().to_string();

        let config = PoolConfig::new(database_url.as_str())
            .with_max_size(2)
            .with_min_idle(Some(1));
        let pool = runtime
            .block_on(DbPool::new(config))
            .map_err(|err| err.to_string())?;

        Ok(Self {
            runtime,
            pool,
            database_url,
            _database: database,
        })
    }

    /// Fixture body shared by the suites.
    pub fn start() -> Option<Self> {
        match Self::setup() {
            Ok(context) => Some(context),
            Err(reason) => handle_cluster_setup_failure(reason),
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    fn client(&self) -> Client {
        Client::connect(self.database_url.as_str(), NoTls)
            .unwrap_or_else(|err| panic!("connect: {}", format_postgres_error(&err)))
    }

    fn insert_returning_id(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> i32 {
        let row = self
            .client()
            .query_one(sql, params)
            .unwrap_or_else(|err| panic!("seed failed: {}", format_postgres_error(&err)));
        row.get(0)
    }

    pub fn seed_user(&self, username: &str) -> UserId {
        UserId::new(self.insert_returning_id(
            concat!(
                "INSERT INTO users (username, first_name, last_name) ",
                "VALUES ($1, 'Seed', 'User') RETURNING id"
            ),
            &[&username],
        ))
    }

    pub fn seed_organization(&self, name: &str) -> OrganizationId {
        OrganizationId::new(self.insert_returning_id(
            "INSERT INTO organizations (name, organization_type) VALUES ($1, 'LLC') RETURNING id",
            &[&name],
        ))
    }

    pub fn seed_responsible(&self, organization: OrganizationId, user: UserId) {
        self.client()
            .execute(
                "INSERT INTO organization_responsible (organization_id, user_id) VALUES ($1, $2)",
                &[&organization.get(), &user.get()],
            )
            .unwrap_or_else(|err| panic!("seed failed: {}", format_postgres_error(&err)));
    }

    pub fn seed_tender(
        &self,
        name: &str,
        status: &str,
        organization: OrganizationId,
        creator: UserId,
    ) -> TenderId {
        TenderId::new(self.insert_returning_id(
            concat!(
                "INSERT INTO tenders (name, service_type, status, organization_id, creator_id) ",
                "VALUES ($1, 'Construction', $2, $3, $4) RETURNING id"
            ),
            &[&name, &status, &organization.get(), &creator.get()],
        ))
    }

    /// Drop a table to simulate schema loss.
    pub fn drop_table(&self, table_name: &str) {
        let escaped_name = table_name.replace('"', "\"\"");
        self.client()
            .batch_execute(&format!(r#"DROP TABLE IF EXISTS "{escaped_name}" CASCADE"#))
            .unwrap_or_else(|err| panic!("drop failed: {}", format_postgres_error(&err)));
    }
}
