use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::data::cache::{Dataset, DatasetCache};
use crate::data::extrema::{find_extrema, AnalysisError, Extrema};

/// File loaded at start-up, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "fitness_data.csv";

/// Rows shown in the data sample panel.
pub const SAMPLE_ROWS: usize = 5;

// ---------------------------------------------------------------------------
// Which extremum panel is showing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtremumView {
    StrongestPositive,
    StrongestNegative,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Memoized datasets, keyed by path.
    cache: DatasetCache,

    /// Path of the file currently shown.
    pub data_path: PathBuf,

    /// Loaded dataset (None if the last load failed).
    pub dataset: Option<Arc<Dataset>>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Extremum panel opened by the last button press.
    pub active_view: Option<ExtremumView>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_FILE)
    }
}

impl AppState {
    /// Create the state and load `path` straight away.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let mut state = Self {
            cache: DatasetCache::new(),
            data_path: path.into(),
            dataset: None,
            status_message: None,
            active_view: None,
        };
        let path = state.data_path.clone();
        state.open(&path);
        state
    }

    /// Switch to `path`, reusing a cached result when there is one.
    pub fn open(&mut self, path: &Path) {
        self.data_path = path.to_path_buf();
        self.active_view = None;

        match self.cache.load(path) {
            Ok(dataset) => {
                if let Err(e) = find_extrema(&dataset.matrix) {
                    log::warn!("{}: {e}", path.display());
                }
                self.dataset = Some(dataset);
                self.status_message = None;
            }
            Err(e) => {
                let e = anyhow::Error::from(e);
                log::error!("Failed to load file: {e:#}");
                self.dataset = None;
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Forget the cached copy of the current file and read it again.
    pub fn reload(&mut self) {
        let path = self.data_path.clone();
        if self.cache.invalidate(&path) {
            log::info!("Reloading {}", path.display());
        }
        self.open(&path);
    }

    /// Record a button press. Only the last pressed panel is shown.
    pub fn press(&mut self, view: ExtremumView) {
        self.active_view = Some(view);
    }

    /// Strongest pairs of the current dataset, recomputed on every call.
    pub fn extrema(&self) -> Option<Result<Extrema, AnalysisError>> {
        self.dataset.as_ref().map(|ds| find_extrema(&ds.matrix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::extrema::CorrelationPair;

    fn write_csv(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn missing_file_leaves_no_dataset_and_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(dir.path().join("fitness_data.csv"));

        assert!(state.dataset.is_none());
        assert!(state.extrema().is_none());
        let msg = state.status_message.as_deref().unwrap();
        assert!(msg.contains("file not found"), "{msg}");
    }

    #[test]
    fn last_pressed_button_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "abc.csv", "A,B,C\n1,2,4\n2,4,3\n3,6,2\n4,8,1\n");
        let mut state = AppState::new(&path);
        assert_eq!(state.active_view, None);

        state.press(ExtremumView::StrongestPositive);
        state.press(ExtremumView::StrongestNegative);
        assert_eq!(state.active_view, Some(ExtremumView::StrongestNegative));

        let ex = state.extrema().unwrap().unwrap();
        assert_eq!(
            ex.min,
            CorrelationPair {
                first: "A".into(),
                second: "C".into(),
                coefficient: -1.0
            }
        );
    }

    #[test]
    fn one_numeric_column_reports_no_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "one.csv", "who,score\na,1\nb,2\n");
        let state = AppState::new(&path);
        assert!(state.dataset.is_some());
        assert_eq!(
            state.extrema(),
            Some(Err(AnalysisError::NoData { columns: 1 }))
        );
    }

    #[test]
    fn reload_picks_up_changes_and_clears_the_view() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "x.csv", "a,b\n1,1\n2,2\n3,3\n");
        let mut state = AppState::new(&path);
        state.press(ExtremumView::StrongestPositive);

        write_csv(&dir, "x.csv", "a,b\n1,3\n2,2\n3,1\n");
        state.open(&path);
        let cached = state.extrema().unwrap().unwrap();
        assert_eq!(cached.max.coefficient, 1.0);

        state.reload();
        assert_eq!(state.active_view, None);
        let fresh = state.extrema().unwrap().unwrap();
        assert_eq!(fresh.max.coefficient, -1.0);
    }

    #[test]
    fn failed_open_clears_previous_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_csv(&dir, "good.csv", "a,b\n1,2\n2,3\n");
        let mut state = AppState::new(&good);
        assert!(state.dataset.is_some());

        state.open(&dir.path().join("missing.csv"));
        assert!(state.dataset.is_none());
        assert!(state.status_message.is_some());
    }
}
