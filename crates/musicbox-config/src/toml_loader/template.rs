//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r##"# musicbox configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[window]
# title = "Apple Music"
# width = 1200            # 400-7680
# height = 800            # 300-4320
# min_width = 800
# min_height = 600
# startup_mode = "windowed"   # windowed | maximized | fullscreen
# toolbar_height = 44     # 0-200

[content]
# home_url = "https://music.apple.com"
# user_agent = "Mozilla/5.0 ..."
# Origins the embedded page may navigate to. Other links open in your browser.
# allowed_origins = [
#     "https://music.apple.com",
#     "https://authorize.music.apple.com",
#     "https://idmsa.apple.com",
#     "https://appleid.apple.com",
# ]
# devtools = true
# autoplay = true
# zoom_step = 0.1         # 0.05-1.0

[logging]
# level = "INFO"          # TRACE | DEBUG | INFO | WARNING | ERROR
"##
}
