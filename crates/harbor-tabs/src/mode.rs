//! Tab mode and server status
//!
//! A tab that has started a mode (share, receive, ...) carries a `Mode` with
//! the state of its local server. The tab strip only cares whether that
//! server is stopped; everything else belongs to the mode implementation.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerStatus {
    /// No server running
    Stopped,
    /// Server is starting up or shutting down
    Working,
    /// Server is up and serving
    Started,
}

impl ServerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServerStatus::Stopped => "stopped",
            ServerStatus::Working => "working",
            ServerStatus::Started => "started",
        }
    }
}

impl std::fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ServerStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stopped" => Ok(ServerStatus::Stopped),
            "working" => Ok(ServerStatus::Working),
            "started" => Ok(ServerStatus::Started),
            _ => Err(format!("Unknown server status: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Mode {
    /// Mode name (opaque to the tab strip)
    pub name: String,
    /// State of the mode's local server
    pub server_status: ServerStatus,
}

impl Mode {
    pub fn new(name: String) -> Self {
        Self {
            name,
            server_status: ServerStatus::Stopped,
        }
    }

    /// True while the server is starting, serving, or shutting down.
    pub fn is_active(&self) -> bool {
        self.server_status != ServerStatus::Stopped
    }
}
