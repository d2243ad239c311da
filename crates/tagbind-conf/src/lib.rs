pub mod diagnostics;

use std::path::Path;
use std::path::PathBuf;

use config::Config;
use config::ConfigError as ExternalConfigError;
use config::Environment;
use config::File;
use config::FileFormat;
use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;

pub use crate::diagnostics::DiagnosticSeverity;
pub use crate::diagnostics::DiagnosticsConfig;

const ENV_PREFIX: &str = "TAGBIND";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration build/deserialize error")]
    Config(#[from] ExternalConfigError),
}

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub debug: bool,
    /// Tag helper prefix elements must carry, e.g. `th:`.
    pub prefix: Option<String>,
    /// Catalog files to load, relative to the project root unless absolute.
    pub catalogs: Vec<PathBuf>,
    pub diagnostics: DiagnosticsConfig,
}

impl Settings {
    /// Loads settings for `project_root`.
    ///
    /// Sources, lowest priority first: the user config file, the project's
    /// `.tagbind.toml`, the project's `tagbind.toml`, then `TAGBIND_*`
    /// environment variables.
    pub fn new(project_root: &Path) -> Result<Self, ConfigError> {
        let user_config_file = ProjectDirs::from("com.github", "tagbind", "tagbind")
            .map(|proj_dirs| proj_dirs.config_dir().join("tagbind.toml"));

        Self::load_from_paths(
            project_root,
            user_config_file.as_deref(),
            Environment::with_prefix(ENV_PREFIX),
        )
    }

    fn load_from_paths(
        project_root: &Path,
        user_config_path: Option<&Path>,
        environment: Environment,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = user_config_path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }

        builder = builder.add_source(
            File::from(project_root.join(".tagbind.toml"))
                .format(FileFormat::Toml)
                .required(false),
        );

        builder = builder.add_source(
            File::from(project_root.join("tagbind.toml"))
                .format(FileFormat::Toml)
                .required(false),
        );

        builder = builder.add_source(environment.try_parsing(true));

        let config = builder.build()?;
        let settings: Settings = config.try_deserialize()?;
        tracing::debug!(
            root = %project_root.display(),
            prefix = ?settings.prefix,
            catalogs = settings.catalogs.len(),
            "loaded settings"
        );
        Ok(settings)
    }

    /// Configured catalogs with relative paths joined onto `project_root`.
    #[must_use]
    pub fn catalog_paths(&self, project_root: &Path) -> Vec<PathBuf> {
        self.catalogs
            .iter()
            .map(|path| project_root.join(path))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    fn no_env() -> Environment {
        Environment::with_prefix(ENV_PREFIX).source(Some(config::Map::new()))
    }

    fn env(vars: &[(&str, &str)]) -> Environment {
        Environment::with_prefix(ENV_PREFIX).source(Some(
            vars.iter()
                .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
                .collect(),
        ))
    }

    fn load(project_root: &Path) -> Result<Settings, ConfigError> {
        Settings::load_from_paths(project_root, None, no_env())
    }

    mod defaults {
        use super::*;

        #[test]
        fn test_load_no_files() {
            let dir = tempdir().unwrap();
            let settings = load(dir.path()).unwrap();
            assert_eq!(settings, Settings::default());
            assert!(settings.catalogs.is_empty());
        }
    }

    mod project_files {
        use super::*;

        #[test]
        fn test_load_tagbind_toml() {
            let dir = tempdir().unwrap();
            fs::write(
                dir.path().join("tagbind.toml"),
                "prefix = \"th:\"\ncatalogs = [\"helpers.toml\", \"/abs/components.json\"]\n",
            )
            .unwrap();
            let settings = load(dir.path()).unwrap();
            assert_eq!(settings.prefix.as_deref(), Some("th:"));
            assert_eq!(
                settings.catalog_paths(dir.path()),
                [
                    dir.path().join("helpers.toml"),
                    PathBuf::from("/abs/components.json")
                ]
            );
        }

        #[test]
        fn test_load_diagnostics_table() {
            let dir = tempdir().unwrap();
            fs::write(
                dir.path().join(".tagbind.toml"),
                "[diagnostics.severity]\nTH2 = \"warning\"\nTH201 = \"off\"\n",
            )
            .unwrap();
            let settings = load(dir.path()).unwrap();
            assert_eq!(
                settings.diagnostics.get_severity("TH200"),
                DiagnosticSeverity::Warning
            );
            assert!(!settings.diagnostics.is_enabled("TH201"));
        }
    }

    mod priority {
        use super::*;

        #[test]
        fn test_tagbind_overrides_dot_tagbind() {
            let dir = tempdir().unwrap();
            fs::write(dir.path().join(".tagbind.toml"), "debug = false").unwrap();
            fs::write(dir.path().join("tagbind.toml"), "debug = true").unwrap();
            assert!(load(dir.path()).unwrap().debug);
        }

        #[test]
        fn test_project_overrides_user() {
            let user_dir = tempdir().unwrap();
            let project_dir = tempdir().unwrap();
            let user_conf_path = user_dir.path().join("tagbind.toml");
            fs::write(&user_conf_path, "debug = true\nprefix = \"user:\"").unwrap();
            fs::write(project_dir.path().join(".tagbind.toml"), "debug = false").unwrap();

            let settings =
                Settings::load_from_paths(project_dir.path(), Some(&user_conf_path), no_env())
                    .unwrap();
            assert!(!settings.debug);
            assert_eq!(settings.prefix.as_deref(), Some("user:"));
        }

        #[test]
        fn test_environment_overrides_files() {
            let dir = tempdir().unwrap();
            fs::write(dir.path().join("tagbind.toml"), "debug = false\nprefix = \"th:\"").unwrap();
            let settings = Settings::load_from_paths(
                dir.path(),
                None,
                env(&[("TAGBIND_DEBUG", "true"), ("TAGBIND_PREFIX", "env:")]),
            )
            .unwrap();
            assert!(settings.debug);
            assert_eq!(settings.prefix.as_deref(), Some("env:"));
        }

        #[test]
        fn test_missing_user_config_is_ignored() {
            let user_dir = tempdir().unwrap();
            let project_dir = tempdir().unwrap();
            let user_conf_path = user_dir.path().join("tagbind.toml");
            fs::write(project_dir.path().join("tagbind.toml"), "debug = true").unwrap();

            let settings =
                Settings::load_from_paths(project_dir.path(), Some(&user_conf_path), no_env())
                    .unwrap();
            assert!(settings.debug);
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn test_invalid_toml_content() {
            let dir = tempdir().unwrap();
            fs::write(dir.path().join("tagbind.toml"), "debug = not_a_boolean").unwrap();
            let result = load(dir.path());
            assert!(matches!(result, Err(ConfigError::Config(_))));
        }

        #[test]
        fn test_unknown_severity() {
            let dir = tempdir().unwrap();
            fs::write(
                dir.path().join("tagbind.toml"),
                "[diagnostics.severity]\nTH = \"fatal\"\n",
            )
            .unwrap();
            assert!(load(dir.path()).is_err());
        }
    }
}
