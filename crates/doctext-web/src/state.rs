use std::path::PathBuf;

use doctext_ingest::Extractors;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub extractors: Extractors,
    /// Directory uploads are staged in for the duration of one request.
    pub temp_dir: PathBuf,
}

impl AppState {
    pub fn new(extractors: Extractors, temp_dir: PathBuf) -> Self {
        Self {
            extractors,
            temp_dir,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Extractors::default(), std::env::temp_dir())
    }
}
