//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# chatline configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[endpoint]
# base_url = "ws://localhost:8000"   # CHATLINE_WS_URL overrides this
# path = "/ws/chat"

[session]
# store_path = "/path/to/session.json"   # default: <data dir>/chatline/session.json
# storage_key = "chat_session_id"
# id_generator = "auto"                  # auto | secure | fallback
# fallback_seed = 1234                  # mixed with clock entropy each run

[connection]
# connect_timeout_secs = 15   # 1-120
# event_buffer = 256          # 16-65536
# auto_connect = true

[outbound]
# policy = "drop"             # drop | queue
# max_queued = 32             # 1-1000

[logging]
# level = "info"              # debug | info | warn | error
"##
    .to_string()
}
