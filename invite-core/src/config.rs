//! Invite configuration at ~/.config/invite/config.toml
//!
//! Values can be overridden with `INVITE__`-prefixed environment variables,
//! e.g. `INVITE__SMTP__PASSWORD`.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT, DEFAULT_UID_DOMAIN};
use crate::error::{InviteError, InviteResult};
use crate::mailer::RelaySettings;
use crate::meeting::{InviteOptions, TimeOrder};

fn default_uid_domain() -> String {
    DEFAULT_UID_DOMAIN.to_string()
}

fn default_smtp_host() -> String {
    DEFAULT_SMTP_HOST.to_string()
}

fn default_smtp_port() -> u16 {
    DEFAULT_SMTP_PORT
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct InviteConfig {
    /// Directory invites are saved to; the current directory when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    #[serde(default = "default_uid_domain")]
    pub uid_domain: String,

    #[serde(default)]
    pub time_order: TimeOrder,

    #[serde(default)]
    pub smtp: SmtpConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SmtpConfig {
    #[serde(default = "default_smtp_host")]
    pub host: String,

    #[serde(default = "default_smtp_port")]
    pub port: u16,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        SmtpConfig {
            host: default_smtp_host(),
            port: default_smtp_port(),
            sender: None,
            password: None,
        }
    }
}

impl SmtpConfig {
    pub fn relay(&self) -> RelaySettings {
        RelaySettings {
            host: self.host.clone(),
            port: self.port,
        }
    }
}

impl Default for InviteConfig {
    fn default() -> Self {
        InviteConfig {
            output_dir: None,
            uid_domain: default_uid_domain(),
            time_order: TimeOrder::default(),
            smtp: SmtpConfig::default(),
        }
    }
}

impl InviteConfig {
    pub fn config_path() -> InviteResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| InviteError::Config("Could not determine config directory".into()))?
            .join("invite");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the user's config, creating a commented default file on first use.
    pub fn load() -> InviteResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load config from `path` (optional) with the environment layered on top.
    pub fn load_from(path: &Path) -> InviteResult<Self> {
        Self::build(
            Config::builder()
                .add_source(File::from(path.to_path_buf()).required(false))
                .add_source(Environment::with_prefix("INVITE").separator("__")),
        )
    }

    /// Parse config from a TOML string, without the environment overlay.
    pub fn from_toml(contents: &str) -> InviteResult<Self> {
        Self::build(
            Config::builder().add_source(File::from_str(contents, config::FileFormat::Toml)),
        )
    }

    fn build(builder: config::ConfigBuilder<config::builder::DefaultState>) -> InviteResult<Self> {
        builder
            .build()
            .map_err(|e| InviteError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| InviteError::Config(e.to_string()))
    }

    /// Output directory with `~` expanded.
    pub fn output_dir(&self) -> Option<PathBuf> {
        self.output_dir.as_ref().map(|dir| {
            PathBuf::from(shellexpand::tilde(&dir.to_string_lossy()).into_owned())
        })
    }

    pub fn invite_options(&self) -> InviteOptions {
        InviteOptions {
            uid_domain: self.uid_domain.clone(),
            time_order: self.time_order,
        }
    }

    /// Effective settings as TOML, with the SMTP password masked.
    pub fn to_display_toml(&self) -> InviteResult<String> {
        let mut shown = self.clone();
        if shown.smtp.password.is_some() {
            shown.smtp.password = Some("********".to_string());
        }
        toml::to_string_pretty(&shown).map_err(|e| InviteError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> InviteResult<()> {
        let contents = format!(
            "\
# invite configuration

# Where invites are saved (defaults to the current directory):
# output_dir = \"~/invites\"

# Suffix of generated event UIDs:
# uid_domain = \"{DEFAULT_UID_DOMAIN}\"

# \"strict\" rejects meetings that end before they start, \"permissive\" allows them:
# time_order = \"strict\"

# [smtp]
# host = \"{DEFAULT_SMTP_HOST}\"
# port = {DEFAULT_SMTP_PORT}
# sender = \"me@example.com\"
# Prefer the INVITE__SMTP__PASSWORD environment variable over storing this here:
# password = \"app-password\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                InviteError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| InviteError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let cfg = InviteConfig::from_toml("").unwrap();
        assert_eq!(cfg, InviteConfig::default());
        assert_eq!(cfg.smtp.relay(), RelaySettings::default());
        assert_eq!(cfg.invite_options(), InviteOptions::default());
    }

    #[test]
    fn test_toml_overrides() {
        let cfg = InviteConfig::from_toml(
            r#"
output_dir = "/srv/invites"
uid_domain = "example.test"
time_order = "permissive"

[smtp]
host = "mail.example.test"
port = 2525
sender = "bot@example.test"
"#,
        )
        .unwrap();

        assert_eq!(cfg.output_dir(), Some(PathBuf::from("/srv/invites")));
        assert_eq!(cfg.invite_options().uid_domain, "example.test");
        assert_eq!(cfg.invite_options().time_order, TimeOrder::Permissive);
        assert_eq!(
            cfg.smtp.relay(),
            RelaySettings {
                host: "mail.example.test".to_string(),
                port: 2525,
            }
        );
        assert_eq!(cfg.smtp.sender.as_deref(), Some("bot@example.test"));
        assert_eq!(cfg.smtp.password, None);
    }

    #[test]
    fn test_display_masks_password() {
        let mut cfg = InviteConfig::default();
        cfg.smtp.password = Some("hunter2".to_string());

        let shown = cfg.to_display_toml().unwrap();

        assert!(!shown.contains("hunter2"));
        assert!(shown.contains("password = \"********\""), "{}", shown);
        assert!(shown.contains("time_order = \"strict\""), "{}", shown);
    }

    #[test]
    fn test_unknown_time_order_is_rejected() {
        let err = InviteConfig::from_toml(r#"time_order = "sometimes""#).unwrap_err();
        assert!(matches!(err, InviteError::Config(_)));
    }

    #[test]
    fn test_default_file_is_all_comments_and_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        InviteConfig::create_default_config(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(
            contents
                .lines()
                .all(|l| l.is_empty() || l.starts_with('#'))
        );
        let cfg = InviteConfig::from_toml(&contents).unwrap();
        assert_eq!(cfg, InviteConfig::default());
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = InviteConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.uid_domain, DEFAULT_UID_DOMAIN);
    }
}
