use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::{DataError, DataResult, Row};

/// A live database the rows are queried from.
pub trait DatabaseConnection: Send + Sync {
    /// Driver name as given in the connection string.
    fn driver_name(&self) -> &str;

    fn query(&self, sql: &str) -> DataResult<Vec<Row>>;
}

/// Family of driver a connection string selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionKind {
    Generic,
    Odbc,
    Ole,
}

impl ConnectionKind {
    pub const ALL: [ConnectionKind; 3] = [Self::Generic, Self::Odbc, Self::Ole];

    pub fn name(self) -> &'static str {
        match self {
            Self::Generic => "Generic",
            Self::Odbc => "ODBC",
            Self::Ole => "OLE",
        }
    }

    fn drivers(self) -> &'static [&'static str] {
        match self {
            Self::Generic => &["SQLExpress"],
            Self::Odbc => &[
                "SQL Server",
                "Microsoft Access Driver",
                "Microsoft ODBC Driver for Oracle",
                "Microsoft ODBC for Oracle",
                "Oracle ODBC Driver",
                "IBM DB2 ODBC DRIVER",
                "MySql",
                "MySql ODBC 3.51 Driver",
                "Microsoft Excel Driver",
                "Microsoft Text Driver",
            ],
            Self::Ole => &["SQLOLEDB", "MSDAORA", "DB2OLEDB", "MySqlProv"],
        }
    }

    /// Returns the driver this kind recognizes in `connection_string`.
    pub fn verify(self, connection_string: &str) -> Option<&'static str> {
        self.drivers()
            .iter()
            .copied()
            .find(|driver| connection_string.contains(driver))
    }

    /// First kind whose driver appears in `connection_string`.
    pub fn detect(connection_string: &str) -> Option<(ConnectionKind, &'static str)> {
        Self::ALL
            .into_iter()
            .find_map(|kind| kind.verify(connection_string).map(|driver| (kind, driver)))
    }
}

impl fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rows selected from one table.
#[derive(Clone)]
pub struct DatabaseData {
    source: String,
    table: String,
    columns: Vec<String>,
    connection: Option<Arc<dyn DatabaseConnection>>,
}

impl DatabaseData {
    /// Fails with `InvalidArgument` when the source, the table or any column
    /// name is empty.
    pub fn new<I, S>(
        source: impl Into<String>,
        table: impl Into<String>,
        columns: I,
    ) -> DataResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let source = source.into();
        let table = table.into();
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();

        if source.trim().is_empty() {
            return Err(DataError::InvalidArgument("data source must not be empty".into()));
        }
        if table.trim().is_empty() {
            return Err(DataError::InvalidArgument("table must not be empty".into()));
        }
        if columns.is_empty() || columns.iter().any(|c| c.trim().is_empty()) {
            return Err(DataError::InvalidArgument("column names must not be empty".into()));
        }

        Ok(Self {
            source,
            table,
            columns,
            connection: None,
        })
    }

    pub fn with_connection(mut self, connection: Arc<dyn DatabaseConnection>) -> Self {
        self.connection = Some(connection);
        self
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Driver family named by the source string, if recognized.
    pub fn connection_kind(&self) -> Option<ConnectionKind> {
        ConnectionKind::detect(&self.source).map(|(kind, _)| kind)
    }

    pub fn query_text(&self) -> String {
        format!("SELECT {} FROM {}", self.columns.join(", "), self.table)
    }

    pub fn rows(&self) -> DataResult<Vec<Row>> {
        let connection = self.connection.as_ref().ok_or_else(|| {
            DataError::Query(format!("no connection configured for {}", self.source))
        })?;

        let sql = self.query_text();
        let rows = connection.query(&sql)?;
        debug!(
            event = "database_rows_read",
            driver = connection.driver_name(),
            table = %self.table,
            count = rows.len()
        );
        Ok(rows)
    }
}

impl fmt::Debug for DatabaseData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseData")
            .field("source", &self.source)
            .field("table", &self.table)
            .field("columns", &self.columns)
            .field("connected", &self.connection.is_some())
            .finish()
    }
}
