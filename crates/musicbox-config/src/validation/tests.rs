use super::*;

#[test]
fn default_config_is_valid() {
    assert!(validate(&MusicboxConfig::default()).is_ok());
}

#[test]
fn window_out_of_range_is_rejected() {
    let mut config = MusicboxConfig::default();
    config.window.width = 100;
    config.window.min_width = 100;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("window.width = 100"), "got: {err}");
}

#[test]
fn min_size_larger_than_size_is_rejected() {
    let mut config = MusicboxConfig::default();
    config.window.min_height = 900;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("window.min_height"), "got: {err}");
}

#[test]
fn non_http_home_url_is_rejected() {
    let mut config = MusicboxConfig::default();
    config.content.home_url = "file:///etc/passwd".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("content.home_url"), "got: {err}");
    assert!(err.contains("http or https"), "got: {err}");
}

#[test]
fn garbage_origin_is_rejected() {
    let mut config = MusicboxConfig::default();
    config.content.allowed_origins.push("not a url".into());
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("content.allowed_origins[4]"), "got: {err}");
}

#[test]
fn errors_are_collected() {
    let mut config = MusicboxConfig::default();
    config.window.toolbar_height = 500;
    config.content.zoom_step = 5.0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("window.toolbar_height"));
    assert!(err.contains("content.zoom_step"));
    assert_eq!(err.matches(';').count(), 1);
}
