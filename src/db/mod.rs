//! Access layer: every conversation with the backend goes through here.
//!
//! Each operation acquires its own connection, runs exactly once and releases the
//! connection before returning, whatever the outcome. Rows come back as [`Record`]s
//! keyed by column name in the order the backend declared them.

use async_trait::async_trait;
use futures::future::BoxFuture;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde_json::Value;
use sqlx::{
    Column, Connection, PgConnection, Postgres, Row, TypeInfo,
    postgres::{PgArguments, PgColumn, PgRow},
    query::Query,
};
use thiserror::Error;

pub mod shop_store;

/// One result row: column name to value, in declared column order
pub type Record = serde_json::Map<String, Value>;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("{0}")]
    Connect(sqlx::Error),

    #[error("{0}")]
    Query(#[from] sqlx::Error),

    #[error("cannot decode column {column} of type {type_name}")]
    UnsupportedType { column: String, type_name: String },

    #[error("unexpected row shape: {0}")]
    Mapping(#[from] serde_json::Error),
}

/// Positional query parameter. Always bound, never spliced into the query text.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Int(Option<i32>),
    Numeric(Option<Decimal>),
    Text(Option<String>),
}

impl From<i32> for Param {
    fn from(value: i32) -> Self {
        Param::Int(Some(value))
    }
}

impl From<Option<i32>> for Param {
    fn from(value: Option<i32>) -> Self {
        Param::Int(value)
    }
}

impl From<Decimal> for Param {
    fn from(value: Decimal) -> Self {
        Param::Numeric(Some(value))
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::Text(Some(value.to_string()))
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::Text(Some(value))
    }
}

impl From<Option<String>> for Param {
    fn from(value: Option<String>) -> Self {
        Param::Text(value)
    }
}

/// Source of backend connections
#[async_trait]
pub trait Connector: Send + Sync {
    type Conn: Send;

    async fn acquire(&self) -> Result<Self::Conn, BackendError>;

    async fn release(&self, conn: Self::Conn);
}

/// Opens a brand new connection for every acquisition
pub struct PgConnector {
    database_url: String,
}

impl PgConnector {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }
}

#[async_trait]
impl Connector for PgConnector {
    type Conn = PgConnection;

    async fn acquire(&self) -> Result<PgConnection, BackendError> {
        PgConnection::connect(&self.database_url).await.map_err(|e| {
            tracing::error!(error = %e, "Database connection error");
            BackendError::Connect(e)
        })
    }

    async fn release(&self, conn: PgConnection) {
        if let Err(e) = conn.close().await {
            tracing::warn!(error = %e, "Failed to close database connection");
        }
    }
}

/// Run `op` on a freshly acquired connection and release it afterwards.
///
/// Release happens on every return path of `op`. If the future panics the
/// connection is dropped, which closes it.
pub async fn scoped<C, T, F>(connector: &C, op: F) -> Result<T, BackendError>
where
    C: Connector + ?Sized,
    T: Send,
    F: for<'c> FnOnce(&'c mut C::Conn) -> BoxFuture<'c, Result<T, BackendError>> + Send,
{
    let mut conn = connector.acquire().await?;
    let result = op(&mut conn).await;
    connector.release(conn).await;
    result
}

/// `$1, $2, ..., $n`
pub fn placeholders(count: usize) -> String {
    (1..=count)
        .map(|i| format!("${i}"))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn procedure_call(name: &str, arity: usize) -> String {
    format!("CALL {}({})", name, placeholders(arity))
}

pub fn function_call(name: &str, arity: usize) -> String {
    format!("SELECT * FROM {}({})", name, placeholders(arity))
}

/// Executes queries and routines against the backend named by the connection string
pub struct AccessLayer<C = PgConnector> {
    connector: C,
}

impl AccessLayer<PgConnector> {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self::with_connector(PgConnector::new(database_url))
    }
}

impl<C> AccessLayer<C>
where
    C: Connector<Conn = PgConnection>,
{
    pub fn with_connector(connector: C) -> Self {
        Self { connector }
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// All rows matching `query`; empty when nothing matches
    pub async fn fetch_all(&self, query: &str, params: Vec<Param>) -> Result<Vec<Record>, BackendError> {
        tracing::debug!(%query, params = params.len(), "fetch_all");
        let sql = query.to_string();

        scoped(&self.connector, move |conn| {
            Box::pin(async move {
                let rows = bind_params(sqlx::query(&sql), params).fetch_all(&mut *conn).await?;
                rows.iter().map(row_to_record).collect::<Result<Vec<_>, BackendError>>()
            })
        })
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Error fetching data"))
    }

    /// First row matching `query`, or `None` when nothing matches
    pub async fn fetch_one(&self, query: &str, params: Vec<Param>) -> Result<Option<Record>, BackendError> {
        tracing::debug!(%query, params = params.len(), "fetch_one");
        let sql = query.to_string();

        scoped(&self.connector, move |conn| {
            Box::pin(async move {
                let row = bind_params(sqlx::query(&sql), params)
                    .fetch_optional(&mut *conn)
                    .await?;
                row.as_ref().map(row_to_record).transpose()
            })
        })
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Error fetching data"))
    }

    /// Run a statement that produces no rows, returning the affected row count
    pub async fn execute(&self, query: &str, params: Vec<Param>) -> Result<u64, BackendError> {
        tracing::debug!(%query, params = params.len(), "execute");
        let sql = query.to_string();

        scoped(&self.connector, move |conn| {
            Box::pin(async move {
                let done = bind_params(sqlx::query(&sql), params).execute(&mut *conn).await?;
                Ok::<_, BackendError>(done.rows_affected())
            })
        })
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Error executing statement"))
    }

    /// Invoke a stored procedure by name with positional arguments
    pub async fn execute_procedure(&self, name: &str, params: Vec<Param>) -> Result<(), BackendError> {
        tracing::debug!(procedure = name, params = params.len(), "execute_procedure");
        let sql = procedure_call(name, params.len());

        scoped(&self.connector, move |conn| {
            Box::pin(async move {
                bind_params(sqlx::query(&sql), params).execute(&mut *conn).await?;
                Ok::<_, BackendError>(())
            })
        })
        .await
        .inspect_err(|e| tracing::error!(procedure = name, error = %e, "Error executing procedure"))
    }

    /// Select every row of a table-valued function
    pub async fn execute_function(&self, name: &str, params: Vec<Param>) -> Result<Vec<Record>, BackendError> {
        tracing::debug!(function = name, params = params.len(), "execute_function");
        let sql = function_call(name, params.len());

        scoped(&self.connector, move |conn| {
            Box::pin(async move {
                let rows = bind_params(sqlx::query(&sql), params).fetch_all(&mut *conn).await?;
                rows.iter().map(row_to_record).collect::<Result<Vec<_>, BackendError>>()
            })
        })
        .await
        .inspect_err(|e| tracing::error!(function = name, error = %e, "Error executing function"))
    }

    /// First column of the first row. `None` when there is no row or the value is NULL.
    pub async fn execute_scalar_function(
        &self,
        query: &str,
        params: Vec<Param>,
    ) -> Result<Option<Value>, BackendError> {
        tracing::debug!(%query, params = params.len(), "execute_scalar_function");
        let sql = query.to_string();

        scoped(&self.connector, move |conn| {
            Box::pin(async move {
                let row = bind_params(sqlx::query(&sql), params)
                    .fetch_optional(&mut *conn)
                    .await?;

                let value = match row.as_ref().and_then(|r| r.columns().first().map(|c| (r, c))) {
                    Some((row, column)) => decode_column(row, column)?,
                    None => Value::Null,
                };

                Ok::<_, BackendError>(match value {
                    Value::Null => None,
                    value => Some(value),
                })
            })
        })
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Error executing scalar function"))
    }
}

fn bind_params(
    mut query: Query<'_, Postgres, PgArguments>,
    params: Vec<Param>,
) -> Query<'_, Postgres, PgArguments> {
    for param in params {
        query = match param {
            Param::Int(value) => query.bind(value),
            Param::Numeric(value) => query.bind(value),
            Param::Text(value) => query.bind(value),
        };
    }
    query
}

fn row_to_record(row: &PgRow) -> Result<Record, BackendError> {
    let mut record = Record::new();
    for column in row.columns() {
        let value = decode_column(row, column)?;
        record.insert(column.name().to_string(), value);
    }
    Ok(record)
}

fn decode_column(row: &PgRow, column: &PgColumn) -> Result<Value, BackendError> {
    let index = column.ordinal();

    let value = match column.type_info().name() {
        "BOOL" => row.try_get::<Option<bool>, _>(index)?.map(Value::from),
        "INT2" => row.try_get::<Option<i16>, _>(index)?.map(Value::from),
        "INT4" => row.try_get::<Option<i32>, _>(index)?.map(Value::from),
        "INT8" => row.try_get::<Option<i64>, _>(index)?.map(Value::from),
        "FLOAT4" => row
            .try_get::<Option<f32>, _>(index)?
            .map(|v| Value::from(f64::from(v))),
        "FLOAT8" => row.try_get::<Option<f64>, _>(index)?.map(Value::from),
        "NUMERIC" => row
            .try_get::<Option<Decimal>, _>(index)?
            .and_then(|v| v.to_f64())
            .map(Value::from),
        "TIMESTAMP" => row
            .try_get::<Option<chrono::NaiveDateTime>, _>(index)?
            .map(|v| Value::String(v.format("%Y-%m-%dT%H:%M:%S%.f").to_string())),
        "TIMESTAMPTZ" => row
            .try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(index)?
            .map(|v| Value::String(v.to_rfc3339())),
        "DATE" => row
            .try_get::<Option<chrono::NaiveDate>, _>(index)?
            .map(|v| Value::String(v.to_string())),
        "VOID" => None,
        "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => {
            row.try_get::<Option<String>, _>(index)?.map(Value::String)
        }
        other => match row.try_get::<Option<String>, _>(index) {
            Ok(text) => text.map(Value::String),
            Err(_) => {
                return Err(BackendError::UnsupportedType {
                    column: column.name().to_string(),
                    type_name: other.to_string(),
                });
            }
        },
    };

    Ok(value.unwrap_or(Value::Null))
}
