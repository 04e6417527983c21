//! Manifest models.
//!
//! Both the project manifest (`cpak.toml`) and the per-package manifests in
//! a registry share the same minimal shape: a `[package]` section naming the
//! package's own coordinate and a flat list of dependency strings.

use serde::{Deserialize, Serialize};
use std::path::Path;

use cpak_util::errors::CpakError;

use crate::coordinate::Coordinate;
use crate::reference::HardReference;
use crate::version::Version;

/// The parsed representation of a cpak manifest file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub package: PackageMetadata,

    /// Dependency coordinate strings, e.g. `"com.github.zlib:zlib:1.2.11"`.
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// Package identity and metadata from the `[package]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageMetadata {
    pub group: String,
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
}

impl Manifest {
    /// Read and parse a manifest file.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CpakError::Manifest {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::parse_toml(&content)
    }

    /// Parse a manifest from a TOML string.
    pub fn parse_toml(content: &str) -> miette::Result<Self> {
        let manifest: Manifest = toml::from_str(content).map_err(|e| CpakError::Manifest {
            message: format!("Invalid manifest: {e}"),
        })?;
        Ok(manifest)
    }

    /// The coordinate this manifest declares for itself.
    pub fn coordinate(&self) -> Option<Coordinate> {
        if self.package.group.is_empty()
            || self.package.name.is_empty()
            || self.package.version.is_empty()
        {
            return None;
        }
        Some(Coordinate::new(
            &self.package.group,
            &self.package.name,
            Version::parse(&self.package.version),
        ))
    }

    /// The manifest's declared dependencies as hard references.
    pub fn hard_references(&self) -> Vec<HardReference> {
        self.dependencies.iter().map(HardReference::new).collect()
    }
}

/// The successful outcome of resolving one reference.
///
/// Wraps the authoritative coordinate the manifest declares for itself,
/// which may differ from the soft name that was used to request it.
#[derive(Debug, Clone)]
pub struct ResolvedManifest {
    pub coordinate: Coordinate,
    pub manifest: Manifest,
}

impl ResolvedManifest {
    /// Wrap a parsed manifest, validating that it declares a full coordinate.
    pub fn new(manifest: Manifest) -> Result<Self, CpakError> {
        let coordinate = manifest.coordinate().ok_or_else(|| CpakError::Manifest {
            message: format!(
                "Manifest for '{}' does not declare a complete group/name/version",
                manifest.package.name
            ),
        })?;
        Ok(Self {
            coordinate,
            manifest,
        })
    }
}
