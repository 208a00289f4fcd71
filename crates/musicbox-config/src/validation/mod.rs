//! Full configuration validation.
//!
//! Each section is checked independently and all errors are collected into
//! a single `ConfigError`.

mod helpers;

#[cfg(test)]
mod tests;

use crate::schema::MusicboxConfig;
use helpers::{validate_http_url, validate_range, validate_range_f64};
use musicbox_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &MusicboxConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_window(&mut errors, config);
    validate_content(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_window(errors: &mut Vec<String>, config: &MusicboxConfig) {
    let w = &config.window;
    validate_range(errors, "window.width", w.width, 400, 7680);
    validate_range(errors, "window.height", w.height, 300, 4320);
    validate_range(errors, "window.toolbar_height", w.toolbar_height, 0, 200);

    if w.min_width > w.width {
        errors.push(format!(
            "window.min_width = {} exceeds window.width = {}",
            w.min_width, w.width
        ));
    }
    if w.min_height > w.height {
        errors.push(format!(
            "window.min_height = {} exceeds window.height = {}",
            w.min_height, w.height
        ));
    }
}

fn validate_content(errors: &mut Vec<String>, config: &MusicboxConfig) {
    let c = &config.content;
    validate_http_url(errors, "content.home_url", &c.home_url);
    for (i, origin) in c.allowed_origins.iter().enumerate() {
        validate_http_url(errors, &format!("content.allowed_origins[{i}]"), origin);
    }
    validate_range_f64(errors, "content.zoom_step", c.zoom_step, 0.05, 1.0);
}
