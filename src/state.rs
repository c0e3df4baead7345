use crate::chart::Chart;
use crate::report::DatasetSummary;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// What the central panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Chart(usize),
    Dataset,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// One chart per analysis, in display order.
    pub charts: Vec<Chart>,

    /// Schema and record count of the loaded table.
    pub summary: DatasetSummary,

    /// Where the table was loaded from, shown in the top bar.
    pub source: String,

    /// Currently selected tab.
    pub view: View,
}

impl AppState {
    pub fn new(charts: Vec<Chart>, summary: DatasetSummary, source: String) -> Self {
        let view = if charts.is_empty() {
            View::Dataset
        } else {
            View::Chart(0)
        };
        Self {
            charts,
            summary,
            source,
            view,
        }
    }

    /// The chart behind the current tab, if it is a chart tab.
    pub fn active_chart(&self) -> Option<&Chart> {
        match self.view {
            View::Chart(idx) => self.charts.get(idx),
            View::Dataset => None,
        }
    }

    /// Move to the next tab, wrapping around after the dataset tab.
    pub fn next_view(&mut self) {
        self.view = match self.view {
            View::Chart(idx) if idx + 1 < self.charts.len() => View::Chart(idx + 1),
            View::Chart(_) => View::Dataset,
            View::Dataset if self.charts.is_empty() => View::Dataset,
            View::Dataset => View::Chart(0),
        };
    }
}
