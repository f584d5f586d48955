use serde::Deserialize;
use config::{Config, ConfigError, Environment, File};

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub hotel: HotelConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub session_duration_hours: i64,
}

/// Issuer block printed at the top of every invoice.
#[derive(Debug, Deserialize, Clone)]
pub struct HotelConfig {
    pub name: String,
    pub address: String,
    pub phone: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("auth.session_duration_hours", 24)?
            .set_default("hotel.name", "Grand Hotel & Resort")?
            .set_default("hotel.address", "123 Luxury Avenue, City")?
            .set_default("hotel.phone", "+1 234-567-8900")?

            // Add config file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))

            // Add environment variables (with INNKEEP__ prefix, double underscore separates levels)
            .add_source(Environment::with_prefix("INNKEEP").separator("__"))

            .build()?;

        config.try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            auth: AuthConfig {
                session_duration_hours: 24,
            },
            hotel: HotelConfig::default(),
        }
    }
}

impl Default for HotelConfig {
    fn default() -> Self {
        Self {
            name: "Grand Hotel & Resort".to_string(),
            address: "123 Luxury Avenue, City".to_string(),
            phone: "+1 234-567-8900".to_string(),
        }
    }
}
