use serde::{Deserialize, Serialize};
use std::io::Read;
use std::io::Write;
use toml;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NetworkConfig {
    pub bind_address: String,
    pub bind_port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FilesConfig {
    pub storage_path: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub network: NetworkConfig,
    pub mongo: MongoConfig,
    pub files: FilesConfig,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            network: NetworkConfig {
                bind_address: String::from("127.0.0.1"),
                bind_port: 3000,
            },
            mongo: MongoConfig {
                uri: String::from("mongodb://127.0.0.1:27017"),
                database: String::from("fileshare"),
            },
            files: FilesConfig {
                storage_path: String::from("uploads"),
            },
        }
    }
}

impl Config {
    fn from_toml(toml: &str) -> Result<Config, toml::de::Error> {
        let config = toml::from_str::<Config>(toml)?;
        Ok(config)
    }

    fn to_toml(&self) -> String {
        toml::to_string(&self).unwrap()
    }

    pub fn from_file(path: &str) -> Result<Config, Box<dyn std::error::Error>> {
        let mut file = std::fs::File::open(path)?;
        let mut contents = String::new();

        file.read_to_string(&mut contents)?;
        let config = Config::from_toml(&contents)?;
        Ok(config)
    }

    pub fn to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let mut file = std::fs::File::create(path)?;
        let toml = self.to_toml();
        file.write_all(toml.as_bytes())?;
        Ok(())
    }

    /// Loads the config file at `path`, writing the defaults there first
    /// if it does not exist yet. The defaults are runnable as-is against
    /// a local MongoDB.
    pub fn get_or_create(path: &str) -> Result<Config, Box<dyn std::error::Error>> {
        if std::path::Path::new(path).exists() {
            Config::from_file(path)
        } else {
            let config = Config::default();
            config.to_file(path)?;
            Ok(config)
        }
    }

    /// The one environment override: `PORT` replaces `network.bind_port`.
    /// A value that does not parse is ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(port) = std::env::var("PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.network.bind_port = port;
            }
        }
    }
}
