use log::{info, LevelFilter};
use std::env;

pub const PATCHER_NAMESPACE: &str = "proxmorph::patcher";
pub const SCHEDULER_NAMESPACE: &str = "proxmorph::scheduler";
pub const SIM_NAMESPACE: &str = "proxmorph::sim";

pub fn init_logging() {
    // Set default log level if not specified in environment
    if env::var("RUST_LOG").is_err() {
        unsafe {
            env::set_var("RUST_LOG", "info");
        }
    }

    // Configure env_logger
    env_logger::Builder::from_env(env_logger::Env::default())
        .format_timestamp_millis()
        .format_module_path(true)
        .format_target(true)
        .filter(Some(PATCHER_NAMESPACE), LevelFilter::Debug)
        .filter(Some(SCHEDULER_NAMESPACE), LevelFilter::Debug)
        .filter(Some(SIM_NAMESPACE), LevelFilter::Debug)
        .init();

    info!("Logging initialized");
}

// Convenience macros for each namespace
#[macro_export]
macro_rules! patcher_log {
    ($($arg:tt)*) => {
        log::log!(target: $crate::logging::PATCHER_NAMESPACE, $($arg)*)
    };
}

#[macro_export]
macro_rules! scheduler_log {
    ($($arg:tt)*) => {
        log::log!(target: $crate::logging::SCHEDULER_NAMESPACE, $($arg)*)
    };
}

#[macro_export]
macro_rules! sim_log {
    ($($arg:tt)*) => {
        log::log!(target: $crate::logging::SIM_NAMESPACE, $($arg)*)
    };
}
