use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use serde::Deserialize;
use crate::common::{UnsurePolicy, ValidatorConfig};
use crate::data::FsAccess;
use crate::error::ValidationError;

pub const CONFIG_ENV_VAR: &str = "BVR_VALIDATE_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "validate.toml";

/// On-disk layout of the validator configuration. Every key is optional.
#[derive(Debug, Deserialize, Default)]
struct ValidatorConfigFile {
    iou_threshold: Option<f32>,
    confidence_threshold: Option<f32>,
    unsure_policy: Option<String>,
    wanted_labels: Option<Vec<String>>,
    annotation_suffix: Option<String>,
    parallel: Option<bool>,
}

impl ValidatorConfig {
    /// Loads the configuration from `path`, else from `$BVR_VALIDATE_CONFIG`, else from
    /// `<config dir>/bvr/validate.toml`. Only the last one may be absent, in which case the
    /// defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let explicit = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var(CONFIG_ENV_VAR).ok().map(PathBuf::from));

        let file_cfg = match explicit {
            Some(path) => read_config_file(&path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => read_config_file(&path)?,
                _ => ValidatorConfigFile::default(),
            },
        };

        let cfg = Self::from_file(file_cfg)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parses a TOML document into a validated configuration.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let file_cfg: ValidatorConfigFile = toml::from_str(raw)
            .context("Failed to parse validator config")?;
        let cfg = Self::from_file(file_cfg)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(file: ValidatorConfigFile) -> Result<Self> {
        let mut cfg = ValidatorConfig::new();
        if let Some(iou) = file.iou_threshold {
            cfg = cfg.with_iou_threshold(iou);
        }
        if let Some(conf) = file.confidence_threshold {
            cfg = cfg.with_confidence_threshold(conf);
        }
        if let Some(policy) = file.unsure_policy {
            let parsed = UnsurePolicy::from_str(&policy).ok_or_else(|| {
                ValidationError::InvalidConfig(format!(
                    "unknown unsure_policy '{}', expected one of: {}",
                    policy,
                    UnsurePolicy::all_unsure_policies().join(", ")
                ))
            })?;
            cfg = cfg.with_unsure_policy(parsed);
        }
        if let Some(labels) = file.wanted_labels {
            cfg.wanted_labels = Some(labels);
        }
        if let Some(suffix) = file.annotation_suffix {
            cfg = cfg.with_annotation_suffix(&suffix);
        }
        if let Some(parallel) = file.parallel {
            cfg = cfg.with_parallel(parallel);
        }
        Ok(cfg)
    }
}

/// `~/.config/bvr/validate.toml` on Linux, the platform equivalent elsewhere.
pub fn default_config_path() -> Option<PathBuf> {
    FsAccess::Config
        .raw_path()
        .ok()
        .map(|dir| dir.join("bvr").join(DEFAULT_CONFIG_FILE))
}

fn read_config_file(path: &Path) -> Result<ValidatorConfigFile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&raw)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_key() {
        let cfg = ValidatorConfig::from_toml_str(
            r#"
            iou_threshold = 0.6
            confidence_threshold = 0.3
            unsure_policy = "ignore"
            wanted_labels = ["person"]
            annotation_suffix = "_annots"
            parallel = true
            "#,
        ).unwrap();
        assert_eq!(cfg.iou_threshold, 0.6);
        assert_eq!(cfg.confidence_threshold, Some(0.3));
        assert_eq!(cfg.unsure_policy, UnsurePolicy::Ignore);
        assert_eq!(cfg.wanted_labels, Some(vec!["person".to_string()]));
        assert_eq!(cfg.annotation_suffix, "_annots");
        assert!(cfg.parallel);
    }

    #[test]
    fn empty_document_yields_defaults() {
        assert_eq!(ValidatorConfig::from_toml_str("").unwrap(), ValidatorConfig::default());
    }

    #[test]
    fn unknown_policy_is_a_config_error() {
        let err = ValidatorConfig::from_toml_str("unsure_policy = \"weighted\"").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ValidationError>(),
            Some(ValidationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn out_of_range_value_fails_validation() {
        assert!(ValidatorConfig::from_toml_str("iou_threshold = 2.0").is_err());
    }

    #[test]
    fn explicit_path_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("validate.toml");
        std::fs::write(&path, "confidence_threshold = 0.45\n").unwrap();
        let cfg = ValidatorConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.confidence_threshold, Some(0.45));
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ValidatorConfig::load(Some(&dir.path().join("absent.toml"))).is_err());
    }
}
