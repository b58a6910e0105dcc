//! Server configuration

use serde::Deserialize;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use super::error::ValidationError;

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Which front end to run
    #[serde(default)]
    pub interface: Interface,

    /// Host address to bind to (HTTP interface)
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on (HTTP interface)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Environment name
    #[serde(default = "default_environment")]
    pub environment: Environment,

    /// Rust log filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log output format
    #[serde(default)]
    pub log_format: LogFormat,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// CORS allowed origins (comma-separated)
    pub cors_origins: Option<String>,

    /// Seconds a conversation may sit idle before it is forgotten (HTTP interface)
    #[serde(default = "default_conversation_ttl")]
    pub conversation_ttl_secs: u64,

    /// Upper bound on conversations held in memory (HTTP interface)
    #[serde(default = "default_max_conversations")]
    pub max_conversations: usize,
}

/// Front end the binary runs
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Interface {
    /// Interactive stdin/stdout loop
    #[default]
    Console,
    /// JSON request/response endpoint
    Http,
}

impl FromStr for Interface {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "console" => Ok(Interface::Console),
            "http" | "web" => Ok(Interface::Http),
            _ => Err(ValidationError::MissingRequired("interface (console|http)")),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Application environment
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl ServerConfig {
    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ValidationError::InvalidBindAddress(self.host.clone()))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Get the conversation idle TTL as Duration
    pub fn conversation_ttl(&self) -> Duration {
        Duration::from_secs(self.conversation_ttl_secs)
    }

    /// Get CORS origins as a vector
    pub fn cors_origins_list(&self) -> Vec<String> {
        self.cors_origins
            .as_ref()
            .map(|s| {
                s.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Validate server configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.interface == Interface::Http {
            if self.port == 0 {
                return Err(ValidationError::InvalidPort);
            }
            self.socket_addr()?;
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.conversation_ttl_secs == 0 {
            return Err(ValidationError::OutOfRange {
                field: "conversation_ttl_secs",
                min: 1,
                max: u32::MAX,
            });
        }
        if self.max_conversations == 0 {
            return Err(ValidationError::OutOfRange {
                field: "max_conversations",
                min: 1,
                max: u32::MAX,
            });
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            interface: Interface::default(),
            host: default_host(),
            port: default_port(),
            environment: default_environment(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            request_timeout_secs: default_request_timeout(),
            cors_origins: None,
            conversation_ttl_secs: default_conversation_ttl(),
            max_conversations: default_max_conversations(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_environment() -> Environment {
    Environment::Development
}

fn default_log_level() -> String {
    "info,intent_chat=debug".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_conversation_ttl() -> u64 {
    30 * 60
}

fn default_max_conversations() -> usize {
    10_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.interface, Interface::Console);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.conversation_ttl(), Duration::from_secs(1800));
        assert_eq!(config.max_conversations, 10_000);
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            ..Default::default()
        };
        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn test_socket_addr_rejects_hostname() {
        let config = ServerConfig {
            host: "not a host".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.socket_addr(),
            Err(ValidationError::InvalidBindAddress(_))
        ));
    }

    #[test]
    fn test_is_production() {
        let mut config = ServerConfig::default();
        assert!(!config.is_production());

        config.environment = Environment::Production;
        assert!(config.is_production());
    }

    #[test]
    fn test_cors_origins_list() {
        let config = ServerConfig {
            cors_origins: Some("http://localhost:3000, https://example.com,".to_string()),
            ..Default::default()
        };
        let origins = config.cors_origins_list();
        assert_eq!(origins, vec!["http://localhost:3000", "https://example.com"]);
    }

    #[test]
    fn test_interface_from_str() {
        assert_eq!("console".parse::<Interface>().unwrap(), Interface::Console);
        assert_eq!("HTTP".parse::<Interface>().unwrap(), Interface::Http);
        assert_eq!("web".parse::<Interface>().unwrap(), Interface::Http);
        assert!("gui".parse::<Interface>().is_err());
    }

    #[test]
    fn test_validation_invalid_port_only_for_http() {
        let mut config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        config.interface = Interface::Http;
        assert_eq!(config.validate(), Err(ValidationError::InvalidPort));
    }

    #[test]
    fn test_validation_invalid_timeout() {
        let config = ServerConfig {
            request_timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
    }

    #[test]
    fn test_validation_conversation_limits() {
        let config = ServerConfig {
            conversation_ttl_secs: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::OutOfRange { field: "conversation_ttl_secs", .. })
        ));

        let config = ServerConfig {
            max_conversations: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::OutOfRange { field: "max_conversations", .. })
        ));
    }
}
