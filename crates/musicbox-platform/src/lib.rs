pub mod crash_report;
pub mod opener;
pub mod paths;

pub use opener::{ExternalOpener, SystemOpener};
pub use paths::{config_dir, crash_report_dir, data_dir, ensure_dirs, log_dir, webview_data_dir};
