//! Tests for the CSV and database row sources.

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use attest_test::{Person, PEOPLE_CSV, PEOPLE_TSV_NO_HEADER};
use tempfile::TempDir;

use super::*;

fn write_fixture(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

// ============================================================================
// CSV
// ============================================================================

mod csv_data {
    use super::*;

    #[test]
    fn test_defaults() {
        let data = CsvData::new("people.csv");
        assert_eq!(data.delimiter(), b',');
        assert!(data.has_headers());
        assert_eq!(data.rows_to_read(), None);
    }

    #[test]
    fn test_rows_skip_blank_lines_and_trim() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "people.csv", PEOPLE_CSV);

        let rows = CsvData::new(&path).rows().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["Ada", "36", "London"]);
    }

    #[test]
    fn test_headers() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "people.csv", PEOPLE_CSV);

        let headers = CsvData::new(&path).headers().unwrap();
        assert_eq!(headers, vec!["name", "age", "city"]);
        assert!(CsvData::new(&path).with_headers(false).headers().unwrap().is_empty());
    }

    #[test]
    fn test_typed_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "people.csv", PEOPLE_CSV);

        let people: Vec<Person> = CsvData::new(&path).records().unwrap();
        assert_eq!(people, Person::sample());
    }

    #[test]
    fn test_rows_to_read_limits_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "people.csv", PEOPLE_CSV);

        let data = CsvData::new(&path).with_rows_to_read(2).unwrap();
        assert_eq!(data.rows().unwrap().len(), 2);
        let people: Vec<Person> = data.records().unwrap();
        assert_eq!(people.len(), 2);

        let none = CsvData::new(&path).with_rows_to_read(0).unwrap();
        assert!(none.rows().unwrap().is_empty());
    }

    #[test]
    fn test_negative_rows_to_read_rejected() {
        let err = CsvData::new("people.csv").with_rows_to_read(-1).unwrap_err();
        assert!(matches!(err, DataError::InvalidArgument(_)));
    }

    #[test]
    fn test_custom_delimiter_without_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "people.tsv", PEOPLE_TSV_NO_HEADER);

        let rows = CsvData::new(&path)
            .with_delimiter(b'\t')
            .with_headers(false)
            .rows()
            .unwrap();
        assert_eq!(rows, vec![vec!["Ada", "36"], vec!["Grace", "45", "Arlington"]]);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = CsvData::new(dir.path().join("missing.csv")).rows().unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
        assert!(err.to_string().contains("missing.csv"));
    }
}

// ============================================================================
// Database
// ============================================================================

/// Returns canned rows and remembers the queries it was given.
struct RecordingConnection {
    rows: Vec<Row>,
    queries: Mutex<Vec<String>>,
}

impl RecordingConnection {
    fn new(rows: Vec<Row>) -> Arc<Self> {
        Arc::new(Self {
            rows,
            queries: Mutex::new(Vec::new()),
        })
    }
}

impl DatabaseConnection for RecordingConnection {
    fn driver_name(&self) -> &str {
        "SQLExpress"
    }

    fn query(&self, sql: &str) -> DataResult<Vec<Row>> {
        self.queries.lock().unwrap().push(sql.to_string());
        Ok(self.rows.clone())
    }
}

mod database {
    use super::*;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|cell| cell.to_string()).collect()
    }

    #[test]
    fn test_query_text() {
        let data = DatabaseData::new("Server=.\\SQLExpress", "people", ["name", "age"]).unwrap();
        assert_eq!(data.query_text(), "SELECT name, age FROM people");
        assert_eq!(data.columns(), ["name", "age"]);
    }

    #[test]
    fn test_rejects_empty_arguments() {
        assert!(DatabaseData::new("", "people", ["name"]).is_err());
        assert!(DatabaseData::new("src", " ", ["name"]).is_err());
        assert!(DatabaseData::new("src", "people", Vec::<String>::new()).is_err());
        assert!(DatabaseData::new("src", "people", ["name", ""]).is_err());
    }

    #[test]
    fn test_rows_come_from_connection() {
        let connection = RecordingConnection::new(vec![row(&["Ada", "36"])]);
        let data = DatabaseData::new("src", "people", ["name", "age"])
            .unwrap()
            .with_connection(connection.clone());

        let rows = data.rows().unwrap();
        assert_eq!(rows, vec![row(&["Ada", "36"])]);
        assert_eq!(
            *connection.queries.lock().unwrap(),
            vec!["SELECT name, age FROM people".to_string()]
        );
    }

    #[test]
    fn test_rows_without_connection() {
        let data = DatabaseData::new("src", "people", ["name"]).unwrap();
        assert!(matches!(data.rows(), Err(DataError::Query(_))));
    }

    #[test]
    fn test_connection_kind_detection() {
        assert_eq!(
            ConnectionKind::detect("Driver={SQL Server};Server=db"),
            Some((ConnectionKind::Odbc, "SQL Server"))
        );
        assert_eq!(
            ConnectionKind::detect("Provider=SQLOLEDB;Data Source=db"),
            Some((ConnectionKind::Ole, "SQLOLEDB"))
        );
        assert_eq!(ConnectionKind::Generic.verify("Server=.\\SQLExpress"), Some("SQLExpress"));
        assert_eq!(ConnectionKind::detect("postgres://localhost"), None);

        let data = DatabaseData::new("Provider=MSDAORA", "t", ["c"]).unwrap();
        assert_eq!(data.connection_kind(), Some(ConnectionKind::Ole));
        assert_eq!(ConnectionKind::Odbc.to_string(), "ODBC");
    }
}
