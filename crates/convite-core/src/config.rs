use std::fs;
use std::path::{
  Path,
  PathBuf
};

use anyhow::{
  Context,
  anyhow,
  bail
};
use chrono_tz::Tz;
use serde::{
  Deserialize,
  Serialize
};
use tracing::{
  debug,
  info,
  warn
};

use crate::datetime::{
  DEFAULT_TIMEZONE,
  default_timezone,
  parse_timezone
};

pub const CONFIG_ENV: &str =
  "CONVITE_CONFIG";
pub const TIMEZONE_ENV: &str =
  "CONVITE_TIMEZONE";
pub const CONFIG_FILE_NAME: &str =
  "convite.toml";

pub const DEFAULT_BASE_PATH: &str =
  "/invitation_project";
pub const DEFAULT_SITE_ORIGIN: &str =
  "http://localhost:8080";
pub const DEFAULT_ADMIN_KEY: &str =
  "zeus-access";
pub const DEFAULT_BRAND: &str =
  "ESSENCIAL PUEBLA";

/// Site-wide settings. Every key is
/// optional.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
  pub timezone:    String,
  pub base_path:   String,
  pub site_origin: String,
  pub admin_key:   String,
  pub brand:       String,
  pub data:        Option<PathBuf>,

  #[serde(skip)]
  pub loaded_from: Option<PathBuf>
}

impl Default for SiteConfig {
  fn default() -> Self {
    Self {
      timezone:    DEFAULT_TIMEZONE
        .to_string(),
      base_path:   DEFAULT_BASE_PATH
        .to_string(),
      site_origin: DEFAULT_SITE_ORIGIN
        .to_string(),
      admin_key:   DEFAULT_ADMIN_KEY
        .to_string(),
      brand:       DEFAULT_BRAND
        .to_string(),
      data:        None,
      loaded_from: None
    }
  }
}

impl SiteConfig {
  pub fn from_toml_str(
    text: &str
  ) -> anyhow::Result<Self> {
    toml::from_str(text).context(
      "invalid site configuration"
    )
  }

  /// Resolves the config file, reads
  /// it if present, then applies the
  /// timezone environment override.
  #[tracing::instrument(skip(
    config_override
  ))]
  pub fn load(
    config_override: Option<&Path>
  ) -> anyhow::Result<Self> {
    let mut cfg = match resolve_config_path(
      config_override
    ) {
      | Some(path) if path.exists() => {
        info!(config = %path.display(), "loading site config");
        Self::load_file(&path)?
      }
      | Some(path) => {
        if config_override.is_some() {
          bail!(
            "config file {} does not \
             exist",
            path.display()
          );
        }
        warn!(config = %path.display(), "config file not found; using defaults");
        Self::default()
      }
      | None => {
        warn!(
          "no config directory; using \
           defaults"
        );
        Self::default()
      }
    };

    if let Ok(tz) =
      std::env::var(TIMEZONE_ENV)
    {
      debug!(timezone = %tz, "timezone from environment");
      cfg.timezone = tz;
    }

    Ok(cfg)
  }

  fn load_file(
    path: &Path
  ) -> anyhow::Result<Self> {
    let text = fs::read_to_string(path)
      .with_context(|| {
        format!(
          "failed to read {}",
          path.display()
        )
      })?;
    let mut cfg =
      Self::from_toml_str(&text)
        .with_context(|| {
          format!(
            "in {}",
            path.display()
          )
        })?;
    cfg.loaded_from =
      Some(path.to_path_buf());
    Ok(cfg)
  }

  /// Applies `key=value` overrides;
  /// unknown keys are an error.
  #[tracing::instrument(skip(
    self, overrides
  ))]
  pub fn apply_overrides<I>(
    &mut self,
    overrides: I
  ) -> anyhow::Result<()>
  where
    I: IntoIterator<
      Item = (String, String)
    >
  {
    for (key, value) in overrides {
      debug!(key = %key, value = %value, "applying override");
      let value = value.trim().to_string();
      match key.trim() {
        | "timezone" => {
          self.timezone = value
        }
        | "base_path" => {
          self.base_path = value
        }
        | "site_origin" => {
          self.site_origin = value
        }
        | "admin_key" => {
          self.admin_key = value
        }
        | "brand" => self.brand = value,
        | "data" => {
          self.data = (!value.is_empty())
            .then(|| PathBuf::from(value))
        }
        | other => {
          return Err(anyhow!(
            "unknown config key: {other}"
          ));
        }
      }
    }
    Ok(())
  }

  /// The configured zone, or the
  /// default one when it does not
  /// resolve.
  pub fn tz(&self) -> Tz {
    parse_timezone(
      &self.timezone,
      "config"
    )
    .unwrap_or_else(default_timezone)
  }

  /// Absolute URL of a site path.
  pub fn absolute_url(
    &self,
    path: &str
  ) -> String {
    format!(
      "{}{}",
      self.site_origin.trim_end_matches('/'),
      path
    )
  }
}

/// `key=value` from the command line.
pub fn parse_override(
  raw: &str
) -> anyhow::Result<(String, String)> {
  let (key, value) = raw
    .split_once('=')
    .ok_or_else(|| {
      anyhow!(
        "expected key=value, got \
         {raw:?}"
      )
    })?;
  Ok((
    key.trim().to_string(),
    value.to_string()
  ))
}

fn resolve_config_path(
  config_override: Option<&Path>
) -> Option<PathBuf> {
  if let Some(path) = config_override {
    return Some(path.to_path_buf());
  }

  if let Ok(env_path) =
    std::env::var(CONFIG_ENV)
    && !env_path.trim().is_empty()
  {
    return Some(PathBuf::from(
      env_path
    ));
  }

  dirs::config_dir().map(|dir| {
    dir
      .join("convite")
      .join(CONFIG_FILE_NAME)
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults() {
    let cfg = SiteConfig::default();
    assert_eq!(
      cfg.base_path,
      "/invitation_project"
    );
    assert_eq!(
      cfg.admin_key,
      "zeus-access"
    );
    assert_eq!(
      cfg.tz(),
      chrono_tz::America::Mexico_City
    );
  }

  #[test]
  fn partial_file_keeps_defaults() {
    let dir = tempfile::tempdir()
      .expect("tempdir");
    let path =
      dir.path().join("convite.toml");
    fs::write(
      &path,
      "timezone = \
       \"Europe/Madrid\"\nbrand = \
       \"Casa\"\n"
    )
    .expect("write config");

    let cfg =
      SiteConfig::load(Some(&path))
        .expect("load");
    assert_eq!(
      cfg.brand, "Casa"
    );
    assert_eq!(
      cfg.base_path,
      DEFAULT_BASE_PATH
    );
    assert_eq!(
      cfg.loaded_from.as_deref(),
      Some(path.as_path())
    );
  }

  #[test]
  fn explicit_missing_file_is_an_error()
  {
    let dir = tempfile::tempdir()
      .expect("tempdir");
    assert!(
      SiteConfig::load(Some(
        &dir.path().join("nope.toml")
      ))
      .is_err()
    );
  }

  #[test]
  fn unknown_file_key_is_rejected() {
    assert!(
      SiteConfig::from_toml_str(
        "colour = \"red\""
      )
      .is_err()
    );
  }

  #[test]
  fn overrides() {
    let mut cfg = SiteConfig::default();
    cfg
      .apply_overrides(vec![
        parse_override("base_path=/")
          .expect("override"),
        parse_override(
          "data=/tmp/x.toml"
        )
        .expect("override"),
      ])
      .expect("apply");
    assert_eq!(cfg.base_path, "/");
    assert_eq!(
      cfg.data,
      Some(PathBuf::from(
        "/tmp/x.toml"
      ))
    );

    assert!(
      cfg
        .apply_overrides(vec![(
          "nope".to_string(),
          "1".to_string()
        )])
        .is_err()
    );
    assert!(
      parse_override("novalue")
        .is_err()
    );
  }

  #[test]
  fn absolute_url_joins_origin() {
    let mut cfg = SiteConfig::default();
    cfg.site_origin =
      "https://invita.test/".to_string();
    assert_eq!(
      cfg.absolute_url(
        "/invitation_project/invitation/a"
      ),
      "https://invita.test/invitation_project/invitation/a"
    );
  }

  #[test]
  fn bad_timezone_falls_back() {
    let mut cfg = SiteConfig::default();
    cfg.timezone =
      "Mars/Olympus".to_string();
    assert_eq!(
      cfg.tz(),
      chrono_tz::America::Mexico_City
    );
  }
}
