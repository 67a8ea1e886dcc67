use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use figment::{
    Figment,
    providers::{Env, Format, Json},
};
use serde::{Deserialize, Serialize};
use snafu::ResultExt;

use crate::{catalog::RenderOptions, error::HelpError};

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct HelpCfg {
    pub render: RenderOptions,
    /// Descriptions for categories whose framework has nowhere to store one.
    pub category_descriptions: HashMap<String, String>,
    #[serde(skip)]
    pub path: PathBuf,
}

impl HelpCfg {
    /// Reads the JSON file at `path`, then applies `HELP_CATALOG_` environment
    /// overrides. Nested keys use `__`, e.g. `HELP_CATALOG_RENDER__PREFIX`.
    /// A missing file yields the defaults.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, HelpError> {
        Ok(Self {
            path: path.as_ref().to_owned(),
            ..Figment::new()
                .merge(Json::file(path))
                .merge(Env::prefixed("HELP_CATALOG_").split("__"))
                .extract_lossy()
                .whatever_context::<&str, HelpError>("Failed to read help configuration")?
        })
    }
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;
    use crate::catalog::{DEFAULT_ACCENT, DEFAULT_PREFIX};

    #[test]
    fn test_read_file_and_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "help.json",
                r##"{
                    "render": { "prefix": "?", "accent": "#FF0000" },
                    "categoryDescriptions": { "Music": "Play songs" }
                }"##,
            )?;
            jail.set_env("HELP_CATALOG_RENDER__TITLE", "Dog help");
            let cfg = HelpCfg::read("help.json").unwrap();
            assert_eq!(cfg.render.prefix, "?");
            assert_eq!(cfg.render.accent, 0xFF0000);
            assert_eq!(cfg.render.title.as_deref(), Some("Dog help"));
            assert_eq!(cfg.category_descriptions["Music"], "Play songs");
            assert_eq!(cfg.path, PathBuf::from("help.json"));
            Ok(())
        });
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        Jail::expect_with(|_| {
            let cfg = HelpCfg::read("absent.json").unwrap();
            assert_eq!(cfg.render.prefix, DEFAULT_PREFIX);
            assert_eq!(cfg.render.accent, DEFAULT_ACCENT);
            assert!(cfg.category_descriptions.is_empty());
            Ok(())
        });
    }

    #[test]
    fn test_invalid_accent_is_an_error() {
        Jail::expect_with(|jail| {
            jail.create_file("help.json", r#"{ "render": { "accent": "purple" } }"#)?;
            assert!(HelpCfg::read("help.json").is_err());
            Ok(())
        });
    }
}
