//! Applies the UniFi color scheme to RRD chart widgets: theme detection,
//! per-chart styling and the pass that walks every chart on the page.

use log::warn;

use crate::host::{ChartHandle, HostError, PageHost, SeriesStyle};
use crate::logging::PATCHER_NAMESPACE;
use crate::palette::{CHART_PALETTE, PRIMARY_GREEN, SECONDARY_BLUE};

/// Stylesheet href substring that marks the UniFi theme as active.
pub const UNIFI_THEME_STYLESHEET: &str = "theme-unifi.css";

/// Component type token the host framework resolves to RRD chart widgets.
pub const RRD_CHART_COMPONENT: &str = "proxmoxRRDChart";

/// Title of the chart whose two stacked series get explicit layering colors.
pub const NETWORK_TRAFFIC_TITLE: &str = "Network Traffic";

const TRAFFIC_LINE_WIDTH: f32 = 2.0;
const TRAFFIC_IN_FILL_ALPHA: f32 = 0.7;
const TRAFFIC_OUT_FILL_ALPHA: f32 = 0.8;

/// True iff one of the page's stylesheet references belongs to the UniFi
/// theme. Gates every pass so other themes' charts are left untouched.
pub fn theme_active(host: &dyn PageHost) -> bool {
    host.stylesheet_hrefs()
        .iter()
        .any(|href| href.contains(UNIFI_THEME_STYLESHEET))
}

/// Apply the theme colors to one chart and request a redraw.
///
/// A chart without a series accessor, or with no series at all, is left
/// alone. A fault in any host call aborts styling of this chart only and is
/// logged as a warning; it never reaches the caller.
pub fn patch_chart(chart: &dyn ChartHandle) {
    match try_patch_chart(chart) {
        Ok(()) => {}
        Err(HostError::NoSeriesAccessor) | Err(HostError::QueryUnavailable) => {}
        Err(e) => {
            warn!(target: PATCHER_NAMESPACE, "chart patch error on '{}': {}", chart.title(), e);
        }
    }
}

fn try_patch_chart(chart: &dyn ChartHandle) -> Result<(), HostError> {
    let series = chart.series()?;
    if series.is_empty() {
        return Ok(());
    }

    if chart.title() == NETWORK_TRAFFIC_TITLE {
        // Two overlapping filled areas: blue bottom layer, green top layer,
        // with distinct alphas so the hues stay readable where they overlap.
        chart.set_colors(&[SECONDARY_BLUE, PRIMARY_GREEN])?;
        for (index, s) in series.iter().enumerate() {
            match index {
                0 => s.set_style(&SeriesStyle {
                    fill: SECONDARY_BLUE.rgba(TRAFFIC_IN_FILL_ALPHA),
                    stroke: SECONDARY_BLUE.hex(),
                    line_width: Some(TRAFFIC_LINE_WIDTH),
                })?,
                1 => s.set_style(&SeriesStyle {
                    fill: PRIMARY_GREEN.rgba(TRAFFIC_OUT_FILL_ALPHA),
                    stroke: PRIMARY_GREEN.hex(),
                    line_width: Some(TRAFFIC_LINE_WIDTH),
                })?,
                // The traffic chart has two series; anything beyond stays as is
                _ => {}
            }
        }
    } else {
        chart.set_colors(CHART_PALETTE.colors())?;
        for (index, s) in series.iter().enumerate() {
            let color = CHART_PALETTE.color(index);
            s.set_style(&SeriesStyle {
                fill: color.hex(),
                stroke: color.hex(),
                line_width: None,
            })?;
        }
    }

    chart.redraw()
}

/// One complete pass: theme gate, component query, per-chart patch.
///
/// Returns the number of charts discovered. A faulty chart never blocks the
/// remaining charts of the same pass.
pub fn run_pass(host: &dyn PageHost) -> usize {
    if !theme_active(host) {
        return 0;
    }

    let charts = match host.query_charts(RRD_CHART_COMPONENT) {
        Ok(charts) => charts,
        Err(HostError::QueryUnavailable) => return 0,
        Err(e) => {
            warn!(target: PATCHER_NAMESPACE, "component query failed: {}", e);
            return 0;
        }
    };

    for chart in &charts {
        patch_chart(chart.as_ref());
    }
    charts.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::sim::{SimChart, SimPage};
    use crate::host::{HostError, MockChartHandle, MockPageHost, MockSeriesHandle, SeriesHandle};
    use crate::palette::{CHART_PALETTE, PRIMARY_GREEN, SECONDARY_BLUE};

    fn themed_page() -> SimPage {
        let page = SimPage::new();
        page.add_stylesheet("/pve2/css/theme-unifi.css");
        page
    }

    #[test]
    fn default_branch_cycles_palette() {
        let chart = SimChart::new(
            "CPU usage",
            &["one", "two", "three", "four", "five", "six", "seven", "eight"],
        );
        patch_chart(&chart);

        assert_eq!(chart.applied_colors(), CHART_PALETTE.colors().to_vec());
        for (index, series) in chart.series_handles().iter().enumerate() {
            let style = series.style().unwrap();
            let expected = CHART_PALETTE.color(index).hex();
            assert_eq!(style.fill, expected);
            assert_eq!(style.stroke, expected);
            assert_eq!(style.line_width, None);
        }
        // Indices past the palette length wrap around
        let seventh = chart.series_handles()[6].style().unwrap();
        assert_eq!(seventh.stroke, CHART_PALETTE.color(0).hex());
        assert_eq!(chart.redraw_count(), 1);
    }

    #[test]
    fn zero_series_chart_is_left_alone() {
        let chart = SimChart::new("Memory usage", &[]);
        patch_chart(&chart);

        assert!(chart.applied_colors().is_empty());
        assert_eq!(chart.redraw_count(), 0);
    }

    #[test]
    fn network_traffic_gets_layered_colors() {
        let chart = SimChart::new("Network Traffic", &["netin", "netout"]);
        patch_chart(&chart);

        assert_eq!(chart.applied_colors(), vec![SECONDARY_BLUE, PRIMARY_GREEN]);

        let incoming = chart.series_handles()[0].style().unwrap();
        assert_eq!(incoming.fill, "rgba(0, 110, 255, 0.7)");
        assert_eq!(incoming.stroke, "#006EFF");
        assert_eq!(incoming.line_width, Some(2.0));

        let outgoing = chart.series_handles()[1].style().unwrap();
        assert_eq!(outgoing.fill, "rgba(48, 173, 85, 0.8)");
        assert_eq!(outgoing.stroke, "#30AD55");
        assert_eq!(outgoing.line_width, Some(2.0));

        assert_eq!(chart.redraw_count(), 1);
    }

    #[test]
    fn network_traffic_extra_series_stay_unstyled() {
        let chart = SimChart::new("Network Traffic", &["netin", "netout", "stray"]);
        patch_chart(&chart);

        assert!(chart.series_handles()[2].style().is_none());
        assert_eq!(chart.redraw_count(), 1);
    }

    #[test]
    fn traffic_title_match_is_case_sensitive() {
        let chart = SimChart::new("network traffic", &["netin", "netout"]);
        patch_chart(&chart);

        assert_eq!(chart.applied_colors(), CHART_PALETTE.colors().to_vec());
    }

    #[test]
    fn chart_without_series_accessor_is_skipped() {
        let chart = SimChart::opaque("Disk IO");
        patch_chart(&chart);

        assert!(chart.applied_colors().is_empty());
        assert_eq!(chart.redraw_count(), 0);
    }

    #[test]
    fn failing_chart_does_not_abort_the_pass() {
        let page = themed_page();
        let first = SimChart::new("CPU usage", &["cpu"]);
        let broken = SimChart::failing("Memory usage", &["total", "used"]);
        let third = SimChart::new("Disk IO", &["read", "write"]);
        page.add_chart(first.clone());
        page.add_chart(broken.clone());
        page.add_chart(third.clone());

        assert_eq!(run_pass(&page), 3);

        assert_eq!(first.redraw_count(), 1);
        assert!(first.series_handles()[0].style().is_some());
        assert_eq!(broken.redraw_count(), 0);
        assert_eq!(third.redraw_count(), 1);
        assert!(third.series_handles()[1].style().is_some());
    }

    #[test]
    fn inactive_theme_skips_discovery() {
        let page = SimPage::new();
        page.add_stylesheet("/pve2/ext6/theme-crisp/resources/theme-crisp-all.css");
        page.add_chart(SimChart::new("CPU usage", &["cpu"]));

        assert_eq!(run_pass(&page), 0);
        assert_eq!(page.query_calls(), 0);
        assert!(page.charts()[0].applied_colors().is_empty());
    }

    #[test]
    fn theme_detection_is_a_substring_match() {
        let mut host = MockPageHost::new();
        host.expect_stylesheet_hrefs().returning(|| {
            vec![
                "/pve2/css/ext6-pve.css".to_string(),
                "/pve2/css/theme-unifi.css?ver=8.1".to_string(),
            ]
        });
        assert!(theme_active(&host));

        let mut bare = MockPageHost::new();
        bare.expect_stylesheet_hrefs().returning(Vec::new);
        assert!(!theme_active(&bare));
    }

    #[test]
    fn unavailable_query_facility_is_a_silent_no_op() {
        let page = themed_page();
        page.set_query_available(false);
        assert_eq!(run_pass(&page), 0);
    }

    #[test]
    fn set_colors_fault_skips_styling_and_redraw() {
        let mut chart = MockChartHandle::new();
        chart.expect_series().returning(|| {
            let mut series = MockSeriesHandle::new();
            series.expect_set_style().never();
            Ok(vec![Box::new(series) as Box<dyn SeriesHandle>])
        });
        chart.expect_title().returning(|| "CPU usage".to_string());
        chart
            .expect_set_colors()
            .returning(|_| Err(HostError::Call("setColors exploded".to_string())));
        chart.expect_redraw().never();

        patch_chart(&chart);
    }

    #[test]
    fn redraw_fault_is_contained() {
        let mut chart = MockChartHandle::new();
        chart.expect_series().returning(|| {
            let mut series = MockSeriesHandle::new();
            series.expect_set_style().returning(|_| Ok(()));
            Ok(vec![Box::new(series) as Box<dyn SeriesHandle>])
        });
        chart.expect_title().returning(|| "Disk IO".to_string());
        chart.expect_set_colors().returning(|_| Ok(()));
        chart
            .expect_redraw()
            .returning(|| Err(HostError::Call("redraw exploded".to_string())));

        // Must not panic or propagate
        patch_chart(&chart);
    }
}
