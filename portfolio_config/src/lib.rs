use std::{
    net::IpAddr,
    path::{Path, PathBuf},
};

use anyhow::Context;
use config::{File, FileFormat};
use portfolio_models::email_address::{EmailAddress, EmailAddressWithName};
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Environment variable holding additional, colon separated config paths.
pub const CONFIG_PATH_ENV: &str = "PORTFOLIO_CONFIG";

/// Loads the default config, overridden by the files listed in
/// [`CONFIG_PATH_ENV`].
pub fn load() -> anyhow::Result<Config> {
    let mut paths = vec![PathBuf::from(DEFAULT_CONFIG_PATH)];
    if let Ok(extra) = std::env::var(CONFIG_PATH_ENV) {
        paths.extend(std::env::split_paths(&extra));
    }
    load_paths(&paths)
}

pub fn load_paths(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    pub contact: ContactConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub smtp_url: String,
    /// Sender used when no sender can be derived from the request.
    pub from: EmailAddressWithName,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    /// Destination of all contact messages.
    pub email: EmailAddress,
    pub site_name: String,
    /// Relative paths are resolved against the working directory.
    pub audit_log: PathBuf,
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_default_config() {
        let config = load_paths(&[Path::new(DEFAULT_CONFIG_PATH)]).unwrap();
        assert_eq!(config.contact.site_name, "Portfolio Contact Form");
        assert_eq!(config.contact.audit_log, Path::new("logs/contact_log.txt"));
    }

    #[test]
    fn later_files_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[contact]\nemail = \"me@example.com\"\n\n[http]\nport = 9000").unwrap();

        let config = load_paths(&[Path::new(DEFAULT_CONFIG_PATH), file.path()]).unwrap();

        assert_eq!(config.contact.email.as_str(), "me@example.com");
        assert_eq!(config.http.port, 9000);
        assert_eq!(config.contact.site_name, "Portfolio Contact Form");
    }

    #[test]
    fn missing_file() {
        assert!(load_paths(&[Path::new("/nonexistent/config.toml")]).is_err());
    }
}
