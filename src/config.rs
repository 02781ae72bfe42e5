use std::fs;
use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "hello-graphql.toml";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "Hello GraphQL", "Hello GraphQL Server")
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    pub address: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub log_file_path: PathBuf,
    pub graphiql: bool,
}

impl Default for Config {
    fn default() -> Self {
        let mut log_file_path: PathBuf = [".", "logs"].iter().collect();

        if let Some(proj_dirs) = project_dirs() {
            log_file_path = PathBuf::from(proj_dirs.data_dir());
            log_file_path.push("logs");
        }

        Self {
            address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 4000,
            log_level: "info".into(),
            log_file_path,
            graphiql: true,
        }
    }
}

impl Config {
    /// Where the configuration file lives when `--config` is not given.
    pub fn default_file() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Layers defaults, the TOML file, `PORT` and the command-line overrides,
    /// each one taking precedence over the previous.
    pub fn figment<T: Serialize>(file: &Path, overrides: T) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(file))
            .merge(Env::raw().only(&["PORT"]))
            .merge(Serialized::defaults(overrides))
    }

    pub fn load<T: Serialize>(file: &Path, overrides: T) -> Result<Config, figment::Error> {
        Config::figment(file, overrides).extract()
    }

    /// Writes the defaults to `file` unless something is already there.
    pub fn write_default_if_missing(file: &Path) -> anyhow::Result<bool> {
        if file.exists() {
            return Ok(false);
        }
        if let Some(dir) = file.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(file, toml::to_string(&Config::default())?)?;
        Ok(true)
    }
}
