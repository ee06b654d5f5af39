//! DDMS schema versions and the version registry
//!
//! A [`Version`] is passed explicitly to every raw-data constructor; a tree
//! being parsed tells its own version through the namespace of its root.

use crate::config::{OutputConfig, Properties};
use crate::error::{Error, Result};
use once_cell::sync::OnceCell;
use std::fmt;

/// A supported revision of the DDMS schema, in release order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Version {
    /// DDMS 2.0
    V2_0,
    /// DDMS 3.0 (also accepted as "3.0.1")
    V3_0,
    /// DDMS 3.1
    V3_1,
    /// DDMS 4.0.1 (also accepted as "4.0")
    V4_0_1,
    /// DDMS 4.1
    V4_1,
    /// DDMS 5.0
    V5_0,
}

impl Version {
    /// All versions, oldest first
    pub const ALL: [Version; 6] = [
        Version::V2_0,
        Version::V3_0,
        Version::V3_1,
        Version::V4_0_1,
        Version::V4_1,
        Version::V5_0,
    ];

    /// Resolve a version token, honouring the aliases "3.0.1" and "4.0"
    pub fn resolve(token: &str) -> Result<Self> {
        match token.trim() {
            "2.0" => Ok(Version::V2_0),
            "3.0" | "3.0.1" => Ok(Version::V3_0),
            "3.1" => Ok(Version::V3_1),
            "4.0.1" | "4.0" => Ok(Version::V4_0_1),
            "4.1" => Ok(Version::V4_1),
            "5.0" => Ok(Version::V5_0),
            other => Err(Error::Configuration(format!(
                "DDMS Version {} is not yet supported.",
                other
            ))),
        }
    }

    /// Canonical version string
    pub fn as_str(&self) -> &'static str {
        match self {
            Version::V2_0 => "2.0",
            Version::V3_0 => "3.0",
            Version::V3_1 => "3.1",
            Version::V4_0_1 => "4.0.1",
            Version::V4_1 => "4.1",
            Version::V5_0 => "5.0",
        }
    }

    /// True if this version is the same as or newer than `other`
    pub fn is_at_least(&self, other: Version) -> bool {
        *self >= other
    }

    /// Version-correct serialized name for a logical `element.field` key.
    ///
    /// Keys with no recorded rename resolve to their last path segment.
    pub fn name_for<'a>(&self, logical: &'a str) -> &'a str {
        let mut name = None;
        for change in NAME_CHANGES.iter().filter(|c| c.key == logical) {
            if self.is_at_least(change.since) {
                name = Some(change.name);
            }
        }
        name.unwrap_or_else(|| logical.rsplit('.').next().unwrap_or(logical))
    }

    /// Namespaces and prefixes of this version from the global registry
    pub fn info(&self) -> &'static VersionInfo {
        VersionRegistry::global().info(*self)
    }

    /// DDMS namespace of this version
    pub fn ddms_namespace(&self) -> &'static str {
        &self.info().ddms_namespace
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

struct NameChange {
    key: &'static str,
    since: Version,
    name: &'static str,
}

const fn rename(key: &'static str, since: Version, name: &'static str) -> NameChange {
    NameChange { key, since, name }
}

static NAME_CHANGES: &[NameChange] = &[
    rename("boundingBox.westBL", Version::V2_0, "WestBL"),
    rename("boundingBox.westBL", Version::V4_0_1, "westBL"),
    rename("boundingBox.eastBL", Version::V2_0, "EastBL"),
    rename("boundingBox.eastBL", Version::V4_0_1, "eastBL"),
    rename("boundingBox.southBL", Version::V2_0, "SouthBL"),
    rename("boundingBox.southBL", Version::V4_0_1, "southBL"),
    rename("boundingBox.northBL", Version::V2_0, "NorthBL"),
    rename("boundingBox.northBL", Version::V4_0_1, "northBL"),
    rename("verticalExtent.minVerticalExtent", Version::V2_0, "MinVerticalExtent"),
    rename("verticalExtent.minVerticalExtent", Version::V4_0_1, "minVerticalExtent"),
    rename("verticalExtent.maxVerticalExtent", Version::V2_0, "MaxVerticalExtent"),
    rename("verticalExtent.maxVerticalExtent", Version::V4_0_1, "maxVerticalExtent"),
    rename("countryCode.qualifier", Version::V5_0, "codespace"),
    rename("countryCode.value", Version::V5_0, "code"),
];

/// Namespace URIs used by one version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    /// The version described
    pub version: Version,
    /// DDMS namespace
    pub ddms_namespace: String,
    /// GML namespace
    pub gml_namespace: String,
    /// ISM (security) namespace
    pub ism_namespace: String,
    /// XLink namespace
    pub xlink_namespace: String,
    /// NTK namespace, only from 4.0.1
    pub ntk_namespace: Option<String>,
}

/// Configured namespace prefixes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefixes {
    /// Prefix for DDMS elements
    pub ddms: String,
    /// Prefix for GML elements
    pub gml: String,
    /// Prefix for ISM attributes
    pub ism: String,
    /// Prefix for NTK elements
    pub ntk: String,
    /// Prefix for XLink attributes
    pub xlink: String,
}

/// Process-wide, read-only table of versions, namespaces and prefixes
#[derive(Debug, Clone)]
pub struct VersionRegistry {
    versions: Vec<VersionInfo>,
    prefixes: Prefixes,
    default_version: Version,
    output: OutputConfig,
}

static GLOBAL: OnceCell<VersionRegistry> = OnceCell::new();

impl VersionRegistry {
    /// Build a registry from a complete property set
    pub fn from_properties(props: &Properties) -> Result<Self> {
        let supported = props
            .get_list("ddms.supportedVersions")?
            .into_iter()
            .map(Version::resolve)
            .collect::<Result<Vec<_>>>()?;
        if let Some(missing) = Version::ALL.iter().find(|v| !supported.contains(v)) {
            return Err(Error::Configuration(format!(
                "ddms.supportedVersions does not list DDMS {}.",
                missing
            )));
        }

        let versions = Version::ALL
            .iter()
            .map(|&version| {
                let key = |family: &str| format!("{}.{}.xmlNamespace", version, family);
                Ok(VersionInfo {
                    version,
                    ddms_namespace: props.get(&key("ddms"))?.to_string(),
                    gml_namespace: props.get(&key("gml"))?.to_string(),
                    ism_namespace: props.get(&key("ism"))?.to_string(),
                    xlink_namespace: props.get(&key("xlink"))?.to_string(),
                    ntk_namespace: props.get_opt(&key("ntk")).map(str::to_string),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let prefixes = Prefixes {
            ddms: props.get("ddms.prefix")?.to_string(),
            gml: props.get("gml.prefix")?.to_string(),
            ism: props.get("ism.prefix")?.to_string(),
            ntk: props.get("ntk.prefix")?.to_string(),
            xlink: props.get("xlink.prefix")?.to_string(),
        };

        Ok(Self {
            versions,
            prefixes,
            default_version: Version::resolve(props.get("ddms.defaultVersion")?)?,
            output: OutputConfig::from_properties(props),
        })
    }

    /// Registry built from the bundled properties
    pub fn builtin() -> Self {
        Self::from_properties(&Properties::builtin())
            .expect("bundled ddms.properties defines every supported version")
    }

    /// The process-wide registry, built from the bundled properties on first use
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(Self::builtin)
    }

    /// Install custom properties as the process-wide registry.
    ///
    /// Only the customizable keys of `custom` are honoured. Fails if the
    /// registry has already been used or installed.
    pub fn install(custom: &Properties) -> Result<&'static Self> {
        let registry = Self::from_properties(&Properties::with_custom(custom))?;
        GLOBAL.set(registry).map_err(|_| {
            Error::Configuration("The version registry has already been initialized.".into())
        })?;
        Ok(Self::global())
    }

    /// Namespaces of a version
    pub fn info(&self, version: Version) -> &VersionInfo {
        &self.versions[version.index()]
    }

    /// Namespace information for every version, oldest first
    pub fn versions(&self) -> &[VersionInfo] {
        &self.versions
    }

    /// Most recent version whose DDMS namespace is `namespace`
    pub fn version_for_namespace(&self, namespace: &str) -> Option<Version> {
        self.versions
            .iter()
            .rev()
            .find(|info| info.ddms_namespace == namespace)
            .map(|info| info.version)
    }

    /// Like [`Self::version_for_namespace`] but fails for unknown namespaces
    pub fn require_version_for_namespace(&self, namespace: &str) -> Result<Version> {
        self.version_for_namespace(namespace).ok_or_else(|| {
            Error::Configuration(format!(
                "Unsupported DDMS namespace: {}",
                if namespace.is_empty() { "(none)" } else { namespace }
            ))
        })
    }

    /// Default version named by the properties
    pub fn default_version(&self) -> Version {
        self.default_version
    }

    /// Configured prefixes
    pub fn prefixes(&self) -> &Prefixes {
        &self.prefixes
    }

    /// Output options from the properties
    pub fn output_config(&self) -> OutputConfig {
        self.output
    }
}
