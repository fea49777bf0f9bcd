use std::sync::Arc;
use std::time::Duration;

use log::Level::Info;
use proxmorph_chartpatch::host::sim::{maybe_start_churn, SimPage, SimPageSpec};
use proxmorph_chartpatch::host::ChartHandle;
use proxmorph_chartpatch::{logging, patcher_log, scheduler};

#[tokio::main]
async fn main() {
    // Initialize logging
    logging::init_logging();

    // Build the simulated console page the patcher runs against
    let spec: SimPageSpec = serde_yaml::from_str(include_str!("../assets/sim_page.yml"))
        .expect("Failed to parse simulated page YAML");
    let page = Arc::new(SimPage::from_spec(&spec));

    // Start chart churn if enabled
    maybe_start_churn(page.clone()).await;

    // Start the patcher and let the first pass plus a few scans run
    let handle = scheduler::start(page.clone());
    tokio::time::sleep(Duration::from_secs(7)).await;

    for chart in page.charts() {
        let colors: Vec<String> = chart.applied_colors().iter().map(|c| c.hex()).collect();
        patcher_log!(
            Info,
            "'{}' colors=[{}] redraws={}",
            chart.title(),
            colors.join(", "),
            chart.redraw_count()
        );
        for series in chart.series_handles() {
            match series.style() {
                Some(style) => patcher_log!(
                    Info,
                    "  {}: fill={} stroke={} line_width={:?}",
                    series.name(),
                    style.fill,
                    style.stroke,
                    style.line_width
                ),
                None => patcher_log!(Info, "  {}: unstyled", series.name()),
            }
        }
    }

    handle.shutdown().await;
}
