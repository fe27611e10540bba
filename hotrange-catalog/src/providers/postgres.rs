use async_trait::async_trait;
use hotrange_core::{CatalogStore, HotRangeError, Result, SchemaObjectRef};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio_postgres::{Client, NoTls, Row};
use tracing::{debug, error, info};

pub const SELECT_RANGE_OBJECT: &str = "SELECT database_name, table_name, index_name \
     FROM crdb_internal.ranges \
     WHERE range_id = $1";

/// Connection parameters for the SQL endpoint of the cluster.
#[derive(Clone, PartialEq)]
pub struct PostgresOptions {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: Option<String>,
    pub connect_timeout_ms: u64,
}

impl Default for PostgresOptions {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 26257,
            database: "defaultdb".to_string(),
            user: "root".to_string(),
            password: None,
            connect_timeout_ms: 5000,
        }
    }
}

impl fmt::Debug for PostgresOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresOptions")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("connect_timeout_ms", &self.connect_timeout_ms)
            .finish()
    }
}

impl PostgresOptions {
    pub fn endpoint(&self) -> String {
        format!("{}@{}:{}/{}", self.user, self.host, self.port, self.database)
    }

    fn to_config(&self) -> tokio_postgres::Config {
        let mut config = tokio_postgres::Config::new();
        config
            .host(&self.host)
            .port(self.port)
            .dbname(&self.database)
            .user(&self.user)
            .application_name("hotrange")
            .connect_timeout(Duration::from_millis(self.connect_timeout_ms));
        if let Some(password) = &self.password {
            config.password(password);
        }
        config
    }
}

/// Catalog backed by `crdb_internal.ranges` over the PostgreSQL wire protocol.
#[derive(Clone)]
pub struct PostgresCatalog {
    client: Arc<Client>,
    endpoint: String,
}

impl fmt::Debug for PostgresCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresCatalog")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl PostgresCatalog {
    /// Open one connection; TLS is not negotiated.
    pub async fn connect(options: &PostgresOptions) -> Result<Self> {
        let endpoint = options.endpoint();
        info!(endpoint = %endpoint, "connecting to the schema catalog");

        let (client, connection) = options
            .to_config()
            .connect(NoTls)
            .await
            .map_err(catalog_error)?;

        // The connection object drives the socket and must be polled on its own task
        let conn_endpoint = endpoint.clone();
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!(endpoint = %conn_endpoint, error = %e, "catalog connection error");
            }
        });

        Ok(Self {
            client: Arc::new(client),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CatalogStore for PostgresCatalog {
    async fn lookup_range(&self, range_id: &str) -> Result<Option<SchemaObjectRef>> {
        let id = parse_range_id(range_id)?;

        let rows = self
            .client
            .query(SELECT_RANGE_OBJECT, &[&id])
            .await
            .map_err(catalog_error)?;
        debug!(range_id, rows = rows.len(), "catalog lookup");

        rows.first().map(schema_object).transpose()
    }
}

pub(crate) fn parse_range_id(range_id: &str) -> Result<i64> {
    range_id
        .trim()
        .parse()
        .map_err(|_| HotRangeError::InvalidRangeId(range_id.to_string()))
}

// system ranges come back with NULL names
fn schema_object(row: &Row) -> Result<SchemaObjectRef> {
    let column = |idx: usize| -> Result<String> {
        let value: Option<String> = row.try_get(idx).map_err(catalog_error)?;
        Ok(value.unwrap_or_default())
    };

    Ok(SchemaObjectRef::new(column(0)?, column(1)?, column(2)?))
}

fn catalog_error(err: tokio_postgres::Error) -> HotRangeError {
    HotRangeError::Catalog(Box::new(err))
}
