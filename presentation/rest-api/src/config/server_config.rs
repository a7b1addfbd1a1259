use super::{env_lookup, non_blank};

/// Server configuration for HTTP listener
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub ip: String,
    pub port: String,
}

impl ServerConfig {
    /// Environment variables:
    /// - SERVICE_IP: IP address to bind (default: "127.0.0.1")
    /// - SERVICE_PORT: Port to bind (default: "8080")
    pub fn from_env() -> Self {
        Self::from_lookup(&env_lookup)
    }

    pub(crate) fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        Self {
            ip: non_blank(lookup, "SERVICE_IP").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: non_blank(lookup, "SERVICE_PORT").unwrap_or_else(|| "8080".to_string()),
        }
    }

    /// Get the bind address as "ip:port"
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.ip, self.port)
    }
}
