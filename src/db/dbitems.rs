use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Error as SqlxError;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, error, info};

/// Maximum length of an item name, in characters
pub const NAME_MAX_LEN: usize = 50;

/// Maximum length of an item description, in characters
pub const DESCRIPTION_MAX_LEN: usize = 250;

const PG_SCHEMA_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS items (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(50) NOT NULL,
        description VARCHAR(250) NOT NULL
    )
"#;

// SQLite ignores VARCHAR lengths, so the limits are spelled out as checks.
const SQLITE_SCHEMA_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS items (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name VARCHAR(50) NOT NULL CHECK (length(name) <= 50),
        description VARCHAR(250) NOT NULL CHECK (length(description) <= 250)
    )
"#;

const PG_INSERT_SQL: &str = "INSERT INTO items (name, description) VALUES ($1, $2)";
const SQLITE_INSERT_SQL: &str = "INSERT INTO items (name, description) VALUES (?1, ?2)";
const LIST_SQL: &str = "SELECT id, name, description FROM items ORDER BY id";

/// Item row from database
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ItemRow {
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// The pool behind the gateway, selected from the database URL scheme
#[derive(Debug, Clone)]
pub enum ItemPool {
    Postgres(PgPool),
    Sqlite(SqlitePool),
}

/// Database gateway for the `items` table
#[derive(Debug, Clone)]
pub struct DbItems {
    pool: ItemPool,
}

impl DbItems {
    /// Create a new database connection pool
    ///
    /// # Arguments
    /// * `database_url` - `sqlite:` URL for SQLite, anything else is treated as PostgreSQL
    ///
    /// # Returns
    /// * `Result<Self, SqlxError>` - Database gateway or error
    pub async fn connect(database_url: &str) -> Result<Self, SqlxError> {
        info!("Connecting to database...");

        let pool = if database_url.starts_with("sqlite:") {
            ItemPool::Sqlite(connect_sqlite(database_url).await?)
        } else {
            let pool = PgPoolOptions::new()
                .max_connections(20)
                .min_connections(2)
                .acquire_timeout(Duration::from_secs(30))
                .idle_timeout(Duration::from_secs(600)) // Close idle connections after 10 minutes
                .max_lifetime(Duration::from_secs(1800)) // Recycle connections after 30 minutes
                .connect(database_url)
                .await?;
            ItemPool::Postgres(pool)
        };

        info!("Database connection pool created successfully ({})", pool.backend_name());

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &ItemPool {
        &self.pool
    }

    /// Create the `items` table if it does not exist yet
    pub async fn ensure_schema(&self) -> Result<(), SqlxError> {
        match &self.pool {
            ItemPool::Postgres(pool) => {
                sqlx::query(PG_SCHEMA_SQL).execute(pool).await?;
            }
            ItemPool::Sqlite(pool) => {
                sqlx::query(SQLITE_SCHEMA_SQL).execute(pool).await?;
            }
        }
        info!("Items table is ready");
        Ok(())
    }

    /// Insert a new item and commit it
    ///
    /// # Arguments
    /// * `name` - Item name, at most 50 characters
    /// * `description` - Item description, at most 250 characters
    ///
    /// # Returns
    /// * `Result<(), SqlxError>` - Connection and constraint failures are returned as is
    pub async fn insert_item(&self, name: &str, description: &str) -> Result<(), SqlxError> {
        // An uncommitted transaction rolls back when dropped, so early returns release it
        match &self.pool {
            ItemPool::Postgres(pool) => {
                let mut tx = pool.begin().await.map_err(|e| {
                    error!("Failed to acquire connection from pool: {}", e);
                    e
                })?;
                sqlx::query(PG_INSERT_SQL)
                    .bind(name)
                    .bind(description)
                    .execute(&mut *tx)
                    .await?;
                tx.commit().await?;
            }
            ItemPool::Sqlite(pool) => {
                let mut tx = pool.begin().await.map_err(|e| {
                    error!("Failed to acquire connection from pool: {}", e);
                    e
                })?;
                sqlx::query(SQLITE_INSERT_SQL)
                    .bind(name)
                    .bind(description)
                    .execute(&mut *tx)
                    .await?;
                tx.commit().await?;
            }
        }

        debug!("Inserted item '{}'", name);
        Ok(())
    }

    /// Get every stored item, oldest first
    pub async fn list_items(&self) -> Result<Vec<ItemRow>, SqlxError> {
        let rows = match &self.pool {
            ItemPool::Postgres(pool) => {
                sqlx::query_as::<_, ItemRow>(LIST_SQL).fetch_all(pool).await?
            }
            ItemPool::Sqlite(pool) => {
                sqlx::query_as::<_, ItemRow>(LIST_SQL).fetch_all(pool).await?
            }
        };
        debug!("Loaded {} items", rows.len());
        Ok(rows)
    }

    /// Check that the store answers a trivial query
    pub async fn ping(&self) -> Result<(), SqlxError> {
        match &self.pool {
            ItemPool::Postgres(pool) => {
                sqlx::query("SELECT 1").execute(pool).await?;
            }
            ItemPool::Sqlite(pool) => {
                sqlx::query("SELECT 1").execute(pool).await?;
            }
        }
        Ok(())
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        match &self.pool {
            ItemPool::Postgres(pool) => pool.close().await,
            ItemPool::Sqlite(pool) => pool.close().await,
        }
        info!("Database connection pool closed");
    }
}

impl ItemPool {
    pub fn backend_name(&self) -> &'static str {
        match self {
            ItemPool::Postgres(_) => "postgres",
            ItemPool::Sqlite(_) => "sqlite",
        }
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

async fn connect_sqlite(database_url: &str) -> Result<SqlitePool, SqlxError> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    if is_in_memory(database_url) {
        // Each connection to an in-memory database sees its own database,
        // so the pool holds exactly one connection that is never recycled.
        return SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await;
    }

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(30))
        .connect_with(options)
        .await
}
