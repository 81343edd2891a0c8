pub mod chart;
pub mod console;
pub mod json;

pub use chart::{build_series, TimeSeriesChart};
pub use console::ConsoleRenderer;
pub use json::{JsonFormat, JsonRenderer};

use crate::error::Result;
use crate::model::{AggregateTotals, DailyBucketSet};

/// The view side of a score run. The driver calls `hide` and `show_loading`
/// before fetching, then either `show_error` or
/// `show_error(None)`/`show`/`render_totals`/`render_series` once data is in.
pub trait Renderer {
    /// `None` clears the status line. See [`crate::error::status_line`] for
    /// which messages get the API error prefix.
    fn show_error(&mut self, message: Option<&str>) -> Result<()>;

    fn show_loading(&mut self) -> Result<()>;

    fn hide(&mut self);

    fn show(&mut self);

    fn render_totals(&mut self, totals: &AggregateTotals) -> Result<()>;

    fn render_series(&mut self, buckets: &DailyBucketSet) -> Result<()>;
}
