//! In-memory presentation archive.
//!
//! The store is constructed once at startup, either from the built-in data
//! set or from a JSON file named in the configuration, and is read-only for
//! the lifetime of the process. The query tools borrow it through an `Arc`
//! captured at registration time.

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::error::StoreError;

/// One archived conference talk.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Presentation {
    /// Talk title.
    pub title: String,
    /// Link to the recording or session page.
    pub url: String,
    /// Conference year.
    pub year: i64,
}

impl fmt::Display for Presentation {
    /// Stable textual rendering used as the content payload on the wire.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) - {}", self.title, self.year, self.url)
    }
}

/// Read-only store backing the presentation query tools.
#[derive(Debug, Clone, Default)]
pub struct PresentationStore {
    records: Vec<Presentation>,
}

impl PresentationStore {
    /// Creates a store over the given records.
    #[must_use]
    pub const fn new(records: Vec<Presentation>) -> Self {
        Self { records }
    }

    /// The built-in JavaOne data set, used when no data file is configured.
    #[must_use]
    pub fn builtin() -> Self {
        let record = |title: &str, url: &str, year: i64| Presentation {
            title: title.to_string(),
            url: url.to_string(),
            year,
        };

        Self::new(vec![
            record(
                "Java 21: The Next LTS",
                "https://javaone.example/2023/java-21-lts",
                2023,
            ),
            record(
                "Virtual Threads in Action",
                "https://javaone.example/2023/virtual-threads",
                2023,
            ),
            record(
                "Pattern Matching for the Rest of Us",
                "https://javaone.example/2024/pattern-matching",
                2024,
            ),
            record(
                "A Tour of the Vector API",
                "https://javaone.example/2024/vector-api",
                2024,
            ),
            record(
                "Project Leyden and Faster Startup",
                "https://javaone.example/2025/project-leyden",
                2025,
            ),
        ])
    }

    /// Loads a store from a JSON file containing an array of records.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid JSON
    /// array of presentation records.
    pub fn from_file(path: &Path) -> Result<Self, StoreError> {
        let contents = std::fs::read_to_string(path).map_err(|e| StoreError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        let records: Vec<Presentation> =
            serde_json::from_str(&contents).map_err(|e| StoreError::Parse {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(Self::new(records))
    }

    /// All records in natural (insertion) order.
    #[must_use]
    pub fn list(&self) -> &[Presentation] {
        &self.records
    }

    /// Records whose year equals `year` exactly, in natural order.
    #[must_use]
    pub fn list_by_year(&self, year: i64) -> Vec<&Presentation> {
        self.records.iter().filter(|p| p.year == year).collect()
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
