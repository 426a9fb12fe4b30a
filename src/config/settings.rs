//! Settings validation

use std::path::Path;

use crate::error::{CheckerError, Result, ResultExt};
use crate::models::config::Settings;

/// Settings validator for ensuring configuration is valid
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate settings and return errors if invalid
    pub fn validate(settings: &Settings) -> Result<()> {
        if !settings.project_path.is_dir() {
            return Err(CheckerError::invalid_path(&settings.project_path));
        }

        for pattern in &settings.ignore_patterns {
            glob::Pattern::new(pattern).with_context(|| format!("Invalid ignore pattern: {}", pattern))?;
        }

        if settings.modules_dir.trim().is_empty() {
            return Err(CheckerError::config_error("modules_dir must not be empty"));
        }

        if let Some(path) = &settings.output_file {
            Self::validate_output_path(path)?;
        }

        Ok(())
    }

    /// Validate that an output path is writable
    fn validate_output_path(path: &Path) -> Result<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        if !parent.exists() {
            return Err(CheckerError::invalid_path(parent));
        }

        let metadata = std::fs::metadata(parent).map_err(CheckerError::io_error)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if metadata.permissions().mode() & 0o200 == 0 {
                return Err(CheckerError::permission_denied(parent));
            }
        }
        #[cfg(not(unix))]
        {
            if metadata.permissions().readonly() {
                return Err(CheckerError::permission_denied(parent));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_validate_defaults_in_existing_dir() {
        let dir = tempdir().unwrap();
        let settings = Settings {
            project_path: dir.path().to_path_buf(),
            ..Default::default()
        };
        assert!(SettingsValidator::validate(&settings).is_ok());
    }

    #[test]
    fn test_validate_missing_project() {
        let settings = Settings {
            project_path: "/no/such/project".into(),
            ..Default::default()
        };
        let err = SettingsValidator::validate(&settings).unwrap_err();
        assert!(matches!(err, CheckerError::InvalidPath { .. }));
    }

    #[test]
    fn test_validate_bad_ignore_pattern() {
        let dir = tempdir().unwrap();
        let settings = Settings {
            project_path: dir.path().to_path_buf(),
            ignore_patterns: vec!["[unclosed".to_string()],
            ..Default::default()
        };
        let err = SettingsValidator::validate(&settings).unwrap_err();
        assert!(err.to_string().contains("Invalid ignore pattern"));
    }

    #[test]
    fn test_validate_output_file_parent() {
        let dir = tempdir().unwrap();
        let ok = Settings {
            project_path: dir.path().to_path_buf(),
            output_file: Some(dir.path().join("report.json")),
            ..Default::default()
        };
        assert!(SettingsValidator::validate(&ok).is_ok());

        let bare = Settings {
            project_path: dir.path().to_path_buf(),
            output_file: Some("report.json".into()),
            ..Default::default()
        };
        assert!(SettingsValidator::validate(&bare).is_ok());

        let missing = Settings {
            project_path: dir.path().to_path_buf(),
            output_file: Some(dir.path().join("missing").join("report.json")),
            ..Default::default()
        };
        assert!(SettingsValidator::validate(&missing).is_err());
    }
}
