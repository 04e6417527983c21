//! Filesystem registry with one manifest file per published version.
//!
//! Layout: `<root>/<group>/<artifact>/<version>.toml`. A reference can name
//! a package three ways: a full `group:artifact:version` coordinate resolves
//! to its exact file, `group:artifact` resolves to the highest published
//! version, and a bare artifact name searches every group.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use cpak_core::manifest::{Manifest, ResolvedManifest};
use cpak_core::reference::SoftReference;
use cpak_core::version::{self, Version};
use cpak_resolver::driver::{LocatedManifest, ManifestSource};
use cpak_util::errors::CpakError;

/// A package registry rooted at a local directory.
#[derive(Debug, Clone)]
pub struct FsRegistry {
    root: PathBuf,
}

impl FsRegistry {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory of this registry.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path within the registry for a given coordinate.
    pub fn manifest_path(&self, group: &str, artifact: &str, version: &str) -> PathBuf {
        self.root
            .join(group)
            .join(artifact)
            .join(format!("{version}.toml"))
    }

    /// Write a manifest into the registry, creating directories as needed.
    pub fn publish(&self, manifest: &Manifest) -> miette::Result<PathBuf> {
        let package = &manifest.package;
        let path = self.manifest_path(&package.group, &package.name, &package.version);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(CpakError::Io)?;
        }
        let content = toml::to_string_pretty(manifest).map_err(|e| CpakError::Store {
            message: format!("Failed to serialize manifest: {e}"),
        })?;
        fs::write(&path, content).map_err(CpakError::Io)?;
        Ok(path)
    }

    /// All published versions of `group/artifact`, highest first.
    pub fn versions_of(&self, group: &str, artifact: &str) -> miette::Result<Vec<Version>> {
        let dir = self.root.join(group).join(artifact);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => {
                return Err(CpakError::Store {
                    message: format!("Failed to list {}: {e}", dir.display()),
                }
                .into())
            }
        };

        let mut versions: Vec<Version> = entries
            .flatten()
            .filter_map(|entry| {
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) != Some("toml") {
                    return None;
                }
                let stem = path.file_stem()?.to_str()?;
                Some(Version::parse(stem))
            })
            .collect();
        versions.sort_by(|a, b| version::descending(a, b).then_with(|| a.original.cmp(&b.original)));
        Ok(versions)
    }

    /// Groups that publish an artifact by this name, in sorted order.
    fn groups_publishing(&self, artifact: &str) -> miette::Result<Vec<String>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => {
                return Err(CpakError::Store {
                    message: format!("Failed to list {}: {e}", self.root.display()),
                }
                .into())
            }
        };

        let mut groups: Vec<String> = Vec::new();
        for entry in entries.flatten() {
            if !entry.path().is_dir() {
                continue;
            }
            let Some(group) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if !self.versions_of(&group, artifact)?.is_empty() {
                groups.push(group);
            }
        }
        groups.sort();
        Ok(groups)
    }

    fn load(&self, path: &Path) -> miette::Result<LocatedManifest> {
        let manifest = Manifest::from_path(path)?;
        let resolved = ResolvedManifest::new(manifest)?;
        let dependencies = resolved.manifest.hard_references();
        Ok(LocatedManifest {
            manifest: resolved,
            dependencies,
        })
    }

    fn locate_exact(
        &self,
        group: &str,
        artifact: &str,
        version: &str,
    ) -> miette::Result<Option<LocatedManifest>> {
        let path = self.manifest_path(group, artifact, version);
        if !path.is_file() {
            return Ok(None);
        }
        self.load(&path).map(Some)
    }

    fn locate_highest(&self, group: &str, artifact: &str) -> miette::Result<Option<LocatedManifest>> {
        let versions = self.versions_of(group, artifact)?;
        let Some(highest) = versions.first() else {
            return Ok(None);
        };
        self.locate_exact(group, artifact, &highest.original)
    }
}

impl ManifestSource for FsRegistry {
    fn locate(&self, reference: &SoftReference) -> miette::Result<Option<LocatedManifest>> {
        let parts: Vec<&str> = reference.name.split(':').collect();
        match parts.as_slice() {
            [group, artifact, version]
                if !group.is_empty() && !artifact.is_empty() && !version.is_empty() =>
            {
                self.locate_exact(group, artifact, version)
            }
            [group, artifact] if !group.is_empty() && !artifact.is_empty() => {
                self.locate_highest(group, artifact)
            }
            [artifact] if !artifact.is_empty() => {
                let groups = self.groups_publishing(artifact)?;
                if groups.len() > 1 {
                    tracing::warn!(
                        "'{artifact}' is published by multiple groups ({}), using '{}'",
                        groups.join(", "),
                        groups[0]
                    );
                }
                match groups.first() {
                    Some(group) => self.locate_highest(group, artifact),
                    None => Ok(None),
                }
            }
            _ => Ok(None),
        }
    }
}
