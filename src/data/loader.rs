use std::fs::File;
use std::path::Path;

use super::model::Table;
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a table from a `.csv` file with a header row.
pub fn load_file(path: &Path) -> Result<Table, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    };

    log::info!(
        "Loaded {} rows x {} columns from {}",
        table.len(),
        table.column_count(),
        path.display()
    );
    Ok(table)
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Header row with column names, then one record per line. Quoted fields may
/// contain commas. Every record must have as many fields as the header.
fn load_csv(path: &Path) -> Result<Table, LoadError> {
    let mut reader = csv::Reader::from_reader(open(path)?);
    let headers: Vec<String> = reader
        .headers()
        .map_err(|source| LoadError::Csv { row: 0, source })?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.iter().all(String::is_empty) {
        return Err(LoadError::MissingHeader(path.to_path_buf()));
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|source| LoadError::Csv {
            row: row_no + 1,
            source,
        })?;
        rows.push(record.iter().map(|v| v.trim().to_string()).collect());
    }

    Ok(Table::from_raw(headers, rows))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::data::model::{CellValue, ColumnType};

    const SAMPLE_CSV: &str = "\
PassengerId,Survived,Pclass,Name,Sex,Age,Fare
1,0,3,\"Braund, Mr. Owen Harris\",male,22,7.25
2,1,1,\"Cumings, Mrs. John Bradley\",female,38,71.2833
3,1,3,\"Heikkinen, Miss. Laina\",female,,7.925
";

    fn write_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_csv_with_typed_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "titanic.csv", SAMPLE_CSV);

        let table = load_file(&path).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.column_count(), 7);

        let dtypes: Vec<_> = table.columns().iter().map(|c| c.dtype).collect();
        assert_eq!(
            dtypes,
            vec![
                ColumnType::Integer,
                ColumnType::Integer,
                ColumnType::Integer,
                ColumnType::Text,
                ColumnType::Text,
                ColumnType::Float,
                ColumnType::Float,
            ]
        );

        let age = table.column_index("Age").unwrap();
        let name = table.column_index("Name").unwrap();
        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows[2][age], CellValue::Null);
        assert_eq!(
            rows[0][name],
            CellValue::String("Braund, Mr. Owen Harris".into())
        );
    }

    #[test]
    fn missing_file_is_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
    }

    #[test]
    fn empty_csv_has_no_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "empty.csv", "");
        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, LoadError::MissingHeader(_)));
    }

    #[test]
    fn header_only_csv_is_an_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "head.csv", "Survived,Pclass,Sex,Age\n");
        let table = load_file(&path).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.column_count(), 4);
    }

    #[test]
    fn ragged_csv_row_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "ragged.csv", "a,b\n1,2\n3\n");
        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, LoadError::Csv { row: 2, .. }));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        for name in ["passengers.xlsx", "passengers.json", "passengers.parquet"] {
            let err = load_file(Path::new(name)).unwrap_err();
            assert!(matches!(err, LoadError::UnsupportedExtension(_)), "{name}");
        }
    }
}
