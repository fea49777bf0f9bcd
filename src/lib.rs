//! proxmorph-chartpatch - UniFi chart colors for the Proxmox web console
//!
//! Recolors the console's RRD chart widgets to the UniFi palette whenever
//! the UniFi theme stylesheet is active. Charts are discovered through the
//! host framework's component query and restyled on a fixed timer, because
//! the host recreates chart instances on view switches and offers no hook
//! for that event.
//!
//! # Modules
//!
//! - [`palette`] - The fixed six-color palette and its CSS renderings
//! - [`host`] - Narrow traits over the host page, charts and series
//! - [`patcher`] - Theme detection, per-chart styling, the patch pass
//! - [`scheduler`] - Delayed first pass and the recurring re-scan
//! - [`logging`] - Namespaced log setup

pub mod host;
pub mod logging;
pub mod palette;
pub mod patcher;
pub mod scheduler;

// Re-export commonly used types
pub use host::{ChartHandle, HostError, PageHost, ReadyState, SeriesHandle, SeriesStyle};
pub use palette::{CHART_PALETTE, Color, Palette};
pub use patcher::{
    NETWORK_TRAFFIC_TITLE, RRD_CHART_COMPONENT, UNIFI_THEME_STYLESHEET, patch_chart, run_pass,
    theme_active,
};
pub use scheduler::{FIRST_PASS_DELAY, PatcherHandle, SCAN_INTERVAL, start};
