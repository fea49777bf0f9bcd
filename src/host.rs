use thiserror::Error;

use crate::palette::Color;

/// Errors surfaced by host page and chart handles.
///
/// The first two variants are expected transient states of the host page
/// (nothing is wrong, the framework or the chart is just not ready) and are
/// skipped silently. `Call` is a runtime fault inside a host object; it is
/// caught per chart, logged as a warning and never propagated further.
#[derive(Error, Debug)]
pub enum HostError {
    #[error("component query facility is not loaded")]
    QueryUnavailable,

    #[error("chart does not expose a series accessor")]
    NoSeriesAccessor,

    #[error("host call failed: {0}")]
    Call(String),
}

/// Style record applied to one series: fill color, stroke color and an
/// optional line width, all in the forms the host chart object accepts.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesStyle {
    pub fill: String,
    pub stroke: String,
    pub line_width: Option<f32>,
}

/// Load state of the host page at observation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Complete,
}

/// One stylable data series inside a chart.
#[cfg_attr(test, mockall::automock)]
pub trait SeriesHandle {
    fn set_style(&self, style: &SeriesStyle) -> Result<(), HostError>;
}

/// A chart widget owned by the host framework.
///
/// The patcher never creates or destroys charts; it only mutates their
/// presentation state for the duration of one pass.
#[cfg_attr(test, mockall::automock)]
pub trait ChartHandle {
    fn title(&self) -> String;

    /// Ordered series of the chart. Order is significant: index 0 is the
    /// bottom layer of a stacked chart.
    fn series(&self) -> Result<Vec<Box<dyn SeriesHandle>>, HostError>;

    /// Set the chart's overall color sequence.
    fn set_colors(&self, colors: &[Color]) -> Result<(), HostError>;

    /// Ask the chart to repaint itself with the styles applied so far.
    fn redraw(&self) -> Result<(), HostError>;
}

/// The host page: stylesheet references, load lifecycle and the component
/// query facility of the UI framework.
pub trait PageHost: Send + Sync {
    /// Addresses of the stylesheets currently referenced by the document.
    fn stylesheet_hrefs(&self) -> Vec<String>;

    fn ready_state(&self) -> ReadyState;

    /// Register a one-shot callback fired when the page finishes loading.
    fn on_load(&self, callback: Box<dyn FnOnce() + Send>);

    /// All live chart instances of the given component type, in registry
    /// order. `Err(QueryUnavailable)` while the framework is still loading.
    fn query_charts(&self, component: &str) -> Result<Vec<Box<dyn ChartHandle>>, HostError>;
}

// `automock` cannot parse the `Box<dyn FnOnce()>` argument of `on_load`
// (mockall issue #139), so the mock is declared manually.
#[cfg(test)]
mockall::mock! {
    pub PageHost {}

    impl PageHost for PageHost {
        fn stylesheet_hrefs(&self) -> Vec<String>;
        fn ready_state(&self) -> ReadyState;
        fn on_load(&self, callback: Box<dyn FnOnce() + Send>);
        fn query_charts(&self, component: &str) -> Result<Vec<Box<dyn ChartHandle>>, HostError>;
    }
}

pub mod sim;
