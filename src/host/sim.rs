//! In-memory stand-in for the host page, used by the demo binary and the
//! test suite. Charts record whatever styling the patcher applies so it can
//! be inspected afterwards.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use log::debug;
use serde::Deserialize;

use crate::logging::SIM_NAMESPACE;
use crate::palette::Color;

use super::{ChartHandle, HostError, PageHost, ReadyState, SeriesHandle, SeriesStyle};

/// One data series of a simulated chart, recording the last applied style.
pub struct SimSeries {
    name: String,
    style: Mutex<Option<SeriesStyle>>,
}

impl SimSeries {
    fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            style: Mutex::new(None),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn style(&self) -> Option<SeriesStyle> {
        self.style.lock().unwrap().clone()
    }

    fn reset(&self) {
        *self.style.lock().unwrap() = None;
    }
}

impl SeriesHandle for Arc<SimSeries> {
    fn set_style(&self, style: &SeriesStyle) -> Result<(), HostError> {
        *self.style.lock().unwrap() = Some(style.clone());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Behavior {
    Normal,
    /// The chart does not expose its series (absent capability).
    NoSeriesAccessor,
    /// Every host call fails (malformed chart state).
    Failing,
}

/// A simulated chart widget.
pub struct SimChart {
    title: String,
    series: Vec<Arc<SimSeries>>,
    colors: Mutex<Vec<Color>>,
    redraws: AtomicUsize,
    behavior: Behavior,
}

impl SimChart {
    pub fn new(title: &str, series_names: &[&str]) -> Arc<Self> {
        Self::with_behavior(title, series_names, Behavior::Normal)
    }

    /// Chart without a series accessor; the patcher must skip it silently.
    pub fn opaque(title: &str) -> Arc<Self> {
        Self::with_behavior(title, &[], Behavior::NoSeriesAccessor)
    }

    /// Chart whose every host call errors out.
    pub fn failing(title: &str, series_names: &[&str]) -> Arc<Self> {
        Self::with_behavior(title, series_names, Behavior::Failing)
    }

    fn with_behavior(title: &str, series_names: &[&str], behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            title: title.to_string(),
            series: series_names.iter().map(|name| SimSeries::new(name)).collect(),
            colors: Mutex::new(Vec::new()),
            redraws: AtomicUsize::new(0),
            behavior,
        })
    }

    /// Overall color sequence last applied through `set_colors`.
    pub fn applied_colors(&self) -> Vec<Color> {
        self.colors.lock().unwrap().clone()
    }

    pub fn redraw_count(&self) -> usize {
        self.redraws.load(Ordering::SeqCst)
    }

    pub fn series_handles(&self) -> &[Arc<SimSeries>] {
        &self.series
    }

    /// Drop all applied styling, as if the host had recreated the chart on a
    /// view switch.
    pub fn reset(&self) {
        self.colors.lock().unwrap().clear();
        for series in &self.series {
            series.reset();
        }
        self.redraws.store(0, Ordering::SeqCst);
    }

    fn fail(&self, call: &str) -> HostError {
        HostError::Call(format!("{}: {} exploded", self.title, call))
    }
}

impl ChartHandle for Arc<SimChart> {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn series(&self) -> Result<Vec<Box<dyn SeriesHandle>>, HostError> {
        match self.behavior {
            Behavior::NoSeriesAccessor => Err(HostError::NoSeriesAccessor),
            Behavior::Failing => Err(self.fail("getSeries")),
            Behavior::Normal => Ok(self
                .series
                .iter()
                .map(|series| Box::new(series.clone()) as Box<dyn SeriesHandle>)
                .collect()),
        }
    }

    fn set_colors(&self, colors: &[Color]) -> Result<(), HostError> {
        if self.behavior == Behavior::Failing {
            return Err(self.fail("setColors"));
        }
        *self.colors.lock().unwrap() = colors.to_vec();
        Ok(())
    }

    fn redraw(&self) -> Result<(), HostError> {
        if self.behavior == Behavior::Failing {
            return Err(self.fail("redraw"));
        }
        self.redraws.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Declarative description of a simulated page, loadable from YAML.
#[derive(Debug, Clone, Deserialize)]
pub struct SimPageSpec {
    pub stylesheets: Vec<String>,
    pub charts: Vec<SimChartSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimChartSpec {
    pub title: String,
    pub series: Vec<String>,
}

/// A simulated host page.
pub struct SimPage {
    stylesheets: Mutex<Vec<String>>,
    ready: Mutex<ReadyState>,
    load_callbacks: Mutex<Vec<Box<dyn FnOnce() + Send>>>,
    charts: Mutex<Vec<Arc<SimChart>>>,
    query_available: AtomicBool,
    query_calls: AtomicUsize,
}

impl SimPage {
    pub fn new() -> Self {
        Self {
            stylesheets: Mutex::new(Vec::new()),
            ready: Mutex::new(ReadyState::Complete),
            load_callbacks: Mutex::new(Vec::new()),
            charts: Mutex::new(Vec::new()),
            query_available: AtomicBool::new(true),
            query_calls: AtomicUsize::new(0),
        }
    }

    pub fn from_spec(spec: &SimPageSpec) -> Self {
        let page = Self::new();
        for href in &spec.stylesheets {
            page.add_stylesheet(href);
        }
        for chart in &spec.charts {
            let names: Vec<&str> = chart.series.iter().map(String::as_str).collect();
            page.add_chart(SimChart::new(&chart.title, &names));
        }
        page
    }

    pub fn add_stylesheet(&self, href: &str) {
        self.stylesheets.lock().unwrap().push(href.to_string());
    }

    pub fn set_ready_state(&self, state: ReadyState) {
        *self.ready.lock().unwrap() = state;
    }

    /// Mark the page as loaded and fire all registered load callbacks.
    pub fn fire_load(&self) {
        *self.ready.lock().unwrap() = ReadyState::Complete;
        let callbacks: Vec<_> = self.load_callbacks.lock().unwrap().drain(..).collect();
        for callback in callbacks {
            callback();
        }
    }

    pub fn set_query_available(&self, available: bool) {
        self.query_available.store(available, Ordering::SeqCst);
    }

    pub fn add_chart(&self, chart: Arc<SimChart>) {
        self.charts.lock().unwrap().push(chart);
    }

    pub fn charts(&self) -> Vec<Arc<SimChart>> {
        self.charts.lock().unwrap().clone()
    }

    /// Number of component queries the patcher has issued against this page.
    pub fn query_calls(&self) -> usize {
        self.query_calls.load(Ordering::SeqCst)
    }

    /// Number of load callbacks registered but not yet fired.
    pub fn pending_load_callbacks(&self) -> usize {
        self.load_callbacks.lock().unwrap().len()
    }
}

impl Default for SimPage {
    fn default() -> Self {
        Self::new()
    }
}

impl PageHost for SimPage {
    fn stylesheet_hrefs(&self) -> Vec<String> {
        self.stylesheets.lock().unwrap().clone()
    }

    fn ready_state(&self) -> ReadyState {
        *self.ready.lock().unwrap()
    }

    fn on_load(&self, callback: Box<dyn FnOnce() + Send>) {
        self.load_callbacks.lock().unwrap().push(callback);
    }

    fn query_charts(&self, component: &str) -> Result<Vec<Box<dyn ChartHandle>>, HostError> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        if !self.query_available.load(Ordering::SeqCst) {
            return Err(HostError::QueryUnavailable);
        }
        let charts = self.charts.lock().unwrap();
        debug!(target: SIM_NAMESPACE, "component query '{}' -> {} charts", component, charts.len());
        Ok(charts
            .iter()
            .map(|chart| Box::new(chart.clone()) as Box<dyn ChartHandle>)
            .collect())
    }
}

#[cfg(feature = "sim_churn")]
pub async fn maybe_start_churn(page: Arc<SimPage>) {
    start_churn(page).await;
}

#[cfg(not(feature = "sim_churn"))]
pub async fn maybe_start_churn(_page: Arc<SimPage>) {
    // No-op without the sim_churn feature
}

/// Periodically reset a random chart's styling, simulating the host
/// recreating charts when the user switches views.
#[cfg(feature = "sim_churn")]
async fn start_churn(page: Arc<SimPage>) {
    use crate::sim_log;
    use log::Level::Info;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};
    use tokio::time::{sleep, Duration};

    tokio::spawn(async move {
        loop {
            sleep(Duration::from_secs(5)).await;
            // Use a local SmallRng for Send safety
            let mut rng = SmallRng::from_entropy();
            let charts = page.charts();
            if charts.is_empty() {
                continue;
            }
            let index = rng.gen_range(0..charts.len());
            charts[index].reset();
            sim_log!(Info, "view switch: chart '{}' recreated", ChartHandle::title(&charts[index]));
        }
    });
}
