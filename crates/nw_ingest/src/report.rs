use serde::Serialize;

/// One source that failed during an ingestion run.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SourceFailure {
    pub source: String,
    pub reason: String,
}

impl SourceFailure {
    pub fn new(source: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            reason: reason.into(),
        }
    }
}

/// Outcome of one ingestion run. `stored` counts successful writes across
/// every source, including sources that later failed partway.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct IngestionReport {
    pub stored: usize,
    pub failures: Vec<SourceFailure>,
}

impl IngestionReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Human-readable summary logged at the end of a run.
    pub fn status_line(&self) -> String {
        format!("Successfully fetched and stored {} articles.", self.stored)
    }
}
