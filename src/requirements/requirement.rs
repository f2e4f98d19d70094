//! Requirement value objects and request parsing.
//!
//! A [`Requirement`] names what a job wants (name, optional version, type).
//! [`ResolveOptions`] carries the strategy-specific hints that travel with a
//! request. [`DependencyRequest`] turns loosely-typed caller parameters into
//! both.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{DepchainError, Result};

/// Requirement type used when the caller does not supply one.
pub const DEFAULT_REQUIREMENT_TYPE: &str = "package";

fn default_requirement_type() -> String {
    DEFAULT_REQUIREMENT_TYPE.to_string()
}

/// A named, optionally versioned request for a runtime dependency.
///
/// Identity for matching purposes is `(name, version, type)`. An absent
/// version means "any version".
///
/// Deserialization applies the same rules as [`Requirement::from_fields`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRequirement")]
pub struct Requirement {
    /// Package name; never empty.
    pub name: String,

    /// Requested or installed version, absent for unversioned.
    pub version: Option<String>,

    /// Requirement type, `"package"` unless stated otherwise.
    #[serde(rename = "type")]
    pub requirement_type: String,
}

/// Wire shape of a requirement before validation.
#[derive(Deserialize)]
struct RawRequirement {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    version: Option<String>,
    #[serde(rename = "type", default)]
    requirement_type: Option<String>,
}

impl TryFrom<RawRequirement> for Requirement {
    type Error = DepchainError;

    fn try_from(raw: RawRequirement) -> Result<Self> {
        Self::from_fields(raw.name, raw.version, raw.requirement_type)
    }
}

impl Requirement {
    /// Create an unversioned `package` requirement.
    ///
    /// Fails with `MissingRequiredField` if `name` is empty.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Self::from_fields(Some(name.into()), None, None)
    }

    /// Build a requirement from optional external fields.
    ///
    /// Empty strings count as absent. A missing name is a caller error.
    pub fn from_fields(
        name: Option<String>,
        version: Option<String>,
        requirement_type: Option<String>,
    ) -> Result<Self> {
        let name = non_empty(name).ok_or_else(|| DepchainError::MissingRequiredField {
            field: "name".to_string(),
        })?;
        Ok(Self {
            name,
            version: non_empty(version),
            requirement_type: non_empty(requirement_type).unwrap_or_else(default_requirement_type),
        })
    }

    /// Parse a command-line spec: `name` or `name@version`.
    pub fn parse_spec(spec: &str, requirement_type: Option<&str>) -> Result<Self> {
        let (name, version) = match spec.split_once('@') {
            Some((name, version)) => (name.trim(), Some(version.trim().to_string())),
            None => (spec.trim(), None),
        };
        Self::from_fields(
            Some(name.to_string()),
            version,
            requirement_type.map(str::to_string),
        )
    }

    /// Set the version, treating an empty string as absent.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = non_empty(Some(version.into()));
        self
    }

    /// Set the requirement type.
    pub fn with_type(mut self, requirement_type: impl Into<String>) -> Self {
        self.requirement_type = requirement_type.into();
        self
    }

    /// The version as a string slice, if any.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Whether this is a default-type (`package`) requirement.
    pub fn is_package(&self) -> bool {
        self.requirement_type == DEFAULT_REQUIREMENT_TYPE
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(v) => write!(f, "{}@{} ({})", self.name, v, self.requirement_type),
            None => write!(f, "{} ({})", self.name, self.requirement_type),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Strategy-specific hints passed through the manager untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveOptions {
    /// Working directory of the job the dependency is resolved for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_directory: Option<PathBuf>,

    /// Resolver-specific parameters.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl ResolveOptions {
    /// Empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resolver-specific parameter.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Parse `KEY=VALUE` pairs into the extension map.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        for pair in pairs {
            let pair = pair.as_ref();
            let (key, value) = pair
                .split_once('=')
                .filter(|(key, _)| !key.trim().is_empty())
                .ok_or_else(|| DepchainError::InvalidField {
                    field: "option".to_string(),
                    message: format!("expected KEY=VALUE, got '{}'", pair),
                })?;
            let key = key.trim();
            if key == "job_directory" {
                options.job_directory = Some(PathBuf::from(value));
            } else {
                options.extra.insert(key.to_string(), value.to_string());
            }
        }
        Ok(options)
    }
}

/// A parsed find/install request: requirement, optional target, options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyRequest {
    /// What to resolve or install.
    pub requirement: Requirement,
    /// Resolver to target; `None` means walk the whole chain.
    pub index: Option<usize>,
    /// Pass-through hints.
    pub options: ResolveOptions,
}

impl DependencyRequest {
    /// Request against the whole resolver chain with no options.
    pub fn new(requirement: Requirement) -> Self {
        Self {
            requirement,
            index: None,
            options: ResolveOptions::default(),
        }
    }

    /// Target a single resolver.
    pub fn at_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// Attach options.
    pub fn with_options(mut self, options: ResolveOptions) -> Self {
        self.options = options;
        self
    }

    /// Parse a flat parameter map.
    ///
    /// `name`, `version`, `type`, `index` and `job_directory` are consumed;
    /// every other key lands in [`ResolveOptions::extra`].
    pub fn from_params(mut params: BTreeMap<String, String>) -> Result<Self> {
        let name = params.remove("name");
        let version = params.remove("version");
        let requirement_type = params.remove("type");
        let requirement = Requirement::from_fields(name, version, requirement_type)?;

        let index = params
            .remove("index")
            .map(|raw| {
                raw.trim()
                    .parse::<usize>()
                    .map_err(|e| DepchainError::InvalidField {
                        field: "index".to_string(),
                        message: format!("'{}': {}", raw, e),
                    })
            })
            .transpose()?;

        let job_directory = params.remove("job_directory").map(PathBuf::from);

        Ok(Self {
            requirement,
            index,
            options: ResolveOptions {
                job_directory,
                extra: params,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn new_defaults_type_and_version() {
        let req = Requirement::new("samtools").unwrap();
        assert_eq!(req.name, "samtools");
        assert!(req.version.is_none());
        assert_eq!(req.requirement_type, "package");
        assert!(req.is_package());
    }

    #[test]
    fn empty_name_is_missing() {
        let err = Requirement::new("  ").unwrap_err();
        assert!(matches!(err, DepchainError::MissingRequiredField { ref field } if field == "name"));
    }

    #[test]
    fn empty_version_counts_as_absent() {
        let req = Requirement::from_fields(Some("bwa".into()), Some(String::new()), None).unwrap();
        assert!(req.version.is_none());
        assert!(Requirement::new("bwa").unwrap().with_version("").version.is_none());
    }

    #[test]
    fn parse_spec_splits_version() {
        let req = Requirement::parse_spec("numpy@1.9.1", None).unwrap();
        assert_eq!(req.name, "numpy");
        assert_eq!(req.version(), Some("1.9.1"));

        let bare = Requirement::parse_spec("numpy", Some("python")).unwrap();
        assert!(bare.version.is_none());
        assert_eq!(bare.requirement_type, "python");
    }

    #[test]
    fn parse_spec_without_name_fails() {
        assert!(Requirement::parse_spec("@1.0", None).is_err());
    }

    #[test]
    fn display_includes_version_when_present() {
        let req = Requirement::new("samtools").unwrap().with_version("1.9");
        assert_eq!(req.to_string(), "samtools@1.9 (package)");
        assert_eq!(
            Requirement::new("samtools").unwrap().to_string(),
            "samtools (package)"
        );
    }

    #[test]
    fn deserializes_with_default_type() {
        let req: Requirement = serde_json::from_str(r#"{"name": "bwa"}"#).unwrap();
        assert_eq!(req.requirement_type, "package");
        assert!(req.version.is_none());
    }

    #[test]
    fn deserialize_rejects_empty_name() {
        let err = serde_json::from_str::<Requirement>(r#"{"name": ""}"#).unwrap_err();
        assert!(err.to_string().contains("'name'"));
        assert!(serde_json::from_str::<Requirement>(r#"{"version": "1.0"}"#).is_err());
    }

    #[test]
    fn deserialize_treats_empty_strings_as_absent() {
        let req: Requirement =
            serde_json::from_str(r#"{"name": "numpy", "version": "", "type": ""}"#).unwrap();
        assert!(req.version.is_none());
        assert_eq!(req.requirement_type, "package");
    }

    #[test]
    fn serializes_type_key() {
        let req = Requirement::new("bwa").unwrap().with_version("0.7");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["type"], "package");
        assert_eq!(json["version"], "0.7");
    }

    #[test]
    fn from_params_moves_unknown_keys_to_extra() {
        let request = DependencyRequest::from_params(params(&[
            ("name", "numpy"),
            ("version", "1.9.1"),
            ("channel", "bioconda"),
            ("job_directory", "/jobs/42"),
        ]))
        .unwrap();
        assert_eq!(request.requirement.name, "numpy");
        assert_eq!(request.requirement.requirement_type, "package");
        assert_eq!(request.index, None);
        assert_eq!(
            request.options.job_directory,
            Some(PathBuf::from("/jobs/42"))
        );
        assert_eq!(request.options.extra.get("channel").unwrap(), "bioconda");
        assert!(!request.options.extra.contains_key("name"));
    }

    #[test]
    fn from_params_parses_index_zero() {
        let request =
            DependencyRequest::from_params(params(&[("name", "x"), ("index", "0")])).unwrap();
        assert_eq!(request.index, Some(0));
    }

    #[test]
    fn from_params_rejects_bad_index() {
        let err = DependencyRequest::from_params(params(&[("name", "x"), ("index", "first")]))
            .unwrap_err();
        assert!(matches!(err, DepchainError::InvalidField { ref field, .. } if field == "index"));
    }

    #[test]
    fn from_params_requires_name() {
        let err = DependencyRequest::from_params(params(&[("version", "1.0")])).unwrap_err();
        assert!(matches!(err, DepchainError::MissingRequiredField { .. }));
    }

    #[test]
    fn options_from_pairs() {
        let options = ResolveOptions::from_pairs(["channel=bioconda", "job_directory=/tmp/j"]).unwrap();
        assert_eq!(options.extra.get("channel").unwrap(), "bioconda");
        assert_eq!(options.job_directory, Some(PathBuf::from("/tmp/j")));
        assert!(ResolveOptions::from_pairs(["novalue"]).is_err());
        assert!(ResolveOptions::from_pairs(["=x"]).is_err());
    }
}
