pub mod paginator;
pub mod widget;


pub use paginator::Paginator;
pub use widget::PriceGraph;

use std::fmt;

use async_trait::async_trait;

use crate::error::Result;
use crate::results::PricePoint;
use crate::selectors;

/// Which way to move the graph's visible date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Forward,
    Backward,
}

impl ScrollDirection {
    pub(crate) fn selector(self) -> &'static str {
        match self {
            ScrollDirection::Forward => selectors::SCROLL_FORWARD,
            ScrollDirection::Backward => selectors::SCROLL_BACKWARD,
        }
    }
}

impl fmt::Display for ScrollDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrollDirection::Forward => f.write_str("forward"),
            ScrollDirection::Backward => f.write_str("backward"),
        }
    }
}

/// Primitive operations over the rendered price graph.
///
/// The trait isolates the paginator from the automation engine: the real
/// implementation drives a browser, tests drive a scripted stub. All
/// per-operation waiting and timeout policy lives behind this seam.
#[async_trait]
pub trait ChartDriver {
    type Point: Send + Sync;

    /// The currently rendered data-point marks, in rendered order. May be
    /// empty depending on widget render state.
    async fn visible_points(&mut self) -> Result<Vec<Self::Point>>;

    /// Interact with one mark so the widget renders its label.
    async fn select_point(&mut self, point: &Self::Point) -> Result<()>;

    /// Read the date and price text currently shown in the label region.
    /// Absent label elements read as the unavailable sentinel, not an error.
    async fn read_label(&mut self) -> Result<PricePoint>;

    /// Move the visible window one internal step. Returns `false` when no
    /// control is available (the widget is at an end-stop) — an expected
    /// terminal condition, not an error.
    async fn scroll(&mut self, direction: ScrollDirection) -> Result<bool>;
}
