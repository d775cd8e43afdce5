use chatline_common::SessionId;

/// Chat endpoint address: configured base plus the fixed chat path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base: String,
    path: String,
}

impl Endpoint {
    pub const DEFAULT_BASE: &'static str = "ws://localhost:8000";
    pub const DEFAULT_PATH: &'static str = "/ws/chat";

    pub fn new(base: impl Into<String>, path: impl Into<String>) -> Self {
        let base = base.into().trim().trim_end_matches('/').to_string();
        let path = path.into();
        let path = if path.starts_with('/') {
            path
        } else {
            format!("/{path}")
        };
        Self { base, path }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// `<base><path>?session_id=<id>`
    pub fn url_for(&self, session_id: &SessionId) -> String {
        format!(
            "{}{}?session_id={}",
            self.base,
            self.path,
            urlencoding::encode(session_id.as_str())
        )
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE, Self::DEFAULT_PATH)
    }
}
