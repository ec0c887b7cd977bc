//! Domain state - the loaded dataset, separate from view concerns

use super::row::Row;
use std::fmt;
use std::path::PathBuf;

/// Where the rows came from
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    /// Sample dataset compiled into the binary
    Embedded,
    File(PathBuf),
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Embedded => write!(f, "sample data"),
            DataSource::File(path) => match path.file_name() {
                Some(name) => write!(f, "{}", name.to_string_lossy()),
                None => write!(f, "{}", path.display()),
            },
        }
    }
}

/// Domain state containing the dataset
///
/// Loaded once at startup and never mutated afterwards.
#[derive(Debug)]
pub struct DomainState {
    pub rows: Vec<Row>,
    pub source: DataSource,
}

impl DomainState {
    pub fn new(rows: Vec<Row>, source: DataSource) -> Self {
        Self { rows, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_source_display() {
        assert_eq!(DataSource::Embedded.to_string(), "sample data");
        assert_eq!(
            DataSource::File(PathBuf::from("/tmp/data/sales.json")).to_string(),
            "sales.json"
        );
    }
}
