//! Workspace ecosystem detection from manifest files.

use serde_json::Value;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{Result, ScanError};
use crate::model::ProjectType;

/// Directory levels below a root searched for manifests.
pub const MANIFEST_DEPTH: usize = 4;

const BUILD_MANIFESTS: &[&str] = &["pom.xml", "build.gradle", "build.gradle.kts"];
const NODE_MANIFESTS: &[&str] = &["package.json"];
const GO_MANIFESTS: &[&str] = &["go.mod"];
const PYTHON_MANIFESTS: &[&str] = &["requirements.txt", "pyproject.toml", "Pipfile"];

/// Dependency and build output directories never searched for manifests.
const SKIPPED_DIRS: &[&str] = &[
    "node_modules",
    "vendor",
    "target",
    "build",
    "dist",
    ".git",
    ".venv",
    "venv",
    "__pycache__",
];

const SPRING_WEB_MARKERS: &[&str] = &["spring-boot-starter-web", "spring-webmvc"];
const GIN_MODULE: &str = "github.com/gin-gonic/gin";
const ECHO_MODULE: &str = "github.com/labstack/echo";

/// Picks the scanner ecosystem for a workspace root.
///
/// Manifests are looked up in the root and up to [`MANIFEST_DEPTH`] levels
/// below it, skipping dependency folders such as `node_modules`. They are
/// checked in priority order: build manifests (`pom.xml`, `build.gradle`,
/// `build.gradle.kts`), then `package.json`, then `go.mod`, then Python
/// dependency files. Within one kind, shallower manifests come first. The
/// first manifest carrying a recognized framework dependency wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectTypeDetector;

impl ProjectTypeDetector {
    pub fn new() -> Self {
        Self
    }

    /// Detects the ecosystem of `root`, returning [`ProjectType::Unknown`]
    /// when nothing matches or a manifest cannot be read.
    pub async fn detect(&self, root: &Path) -> ProjectType {
        match self.try_detect(root).await {
            Ok(project_type) => {
                debug!(root = %root.display(), %project_type, "detected project type");
                project_type
            }
            Err(e) => {
                warn!(root = %root.display(), error = %e, "project detection failed");
                ProjectType::Unknown
            }
        }
    }

    /// Like [`detect`](Self::detect) but surfaces manifest read failures.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Detection`] if a manifest exists but cannot be
    /// read, or if a `package.json` is not valid JSON.
    pub async fn try_detect(&self, root: &Path) -> Result<ProjectType> {
        let manifests = find_manifests(root).await?;

        for path in named(&manifests, BUILD_MANIFESTS) {
            if let Some(content) = read_manifest(path).await? {
                if SPRING_WEB_MARKERS.iter().any(|m| content.contains(m)) {
                    return Ok(ProjectType::SpringBoot);
                }
            }
        }

        for path in named(&manifests, NODE_MANIFESTS) {
            if let Some(content) = read_manifest(path).await? {
                if let Some(project_type) = detect_node(path, &content)? {
                    return Ok(project_type);
                }
            }
        }

        for path in named(&manifests, GO_MANIFESTS) {
            if let Some(content) = read_manifest(path).await? {
                if content.contains(GIN_MODULE) {
                    return Ok(ProjectType::Gin);
                }
                if content.contains(ECHO_MODULE) {
                    return Ok(ProjectType::Echo);
                }
            }
        }

        for path in named(&manifests, PYTHON_MANIFESTS) {
            if let Some(content) = read_manifest(path).await? {
                if content.to_lowercase().contains("fastapi") {
                    return Ok(ProjectType::FastApi);
                }
            }
        }

        Ok(ProjectType::Unknown)
    }
}

/// Lists every manifest under `root`, shallowest first.
async fn find_manifests(root: &Path) -> Result<Vec<PathBuf>> {
    let root = root.to_path_buf();
    tokio::task::spawn_blocking(move || collect_manifests(&root))
        .await
        .map_err(|e| ScanError::Task(e.to_string()))
}

fn collect_manifests(root: &Path) -> Vec<PathBuf> {
    let mut found: Vec<(usize, PathBuf)> = WalkDir::new(root)
        .max_depth(MANIFEST_DEPTH)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !SKIPPED_DIRS.iter().any(|d| entry.file_name() == OsStr::new(d))
        })
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && is_manifest(entry.file_name()))
        .map(|entry| (entry.depth(), entry.into_path()))
        .collect();
    found.sort_by_key(|(depth, _)| *depth);
    found.into_iter().map(|(_, path)| path).collect()
}

fn is_manifest(name: &OsStr) -> bool {
    [BUILD_MANIFESTS, NODE_MANIFESTS, GO_MANIFESTS, PYTHON_MANIFESTS]
        .iter()
        .any(|names| names.iter().any(|n| name == OsStr::new(n)))
}

fn named<'a>(
    manifests: &'a [PathBuf],
    names: &'a [&'a str],
) -> impl Iterator<Item = &'a Path> + 'a {
    manifests
        .iter()
        .filter(move |path| {
            path.file_name()
                .is_some_and(|n| names.iter().any(|m| n == OsStr::new(m)))
        })
        .map(PathBuf::as_path)
}

/// Reads a manifest, treating a file that vanished since the walk as absent.
async fn read_manifest(path: &Path) -> Result<Option<String>> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ScanError::Detection {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }),
    }
}

fn detect_node(path: &Path, content: &str) -> Result<Option<ProjectType>> {
    let manifest: Value = serde_json::from_str(content).map_err(|e| ScanError::Detection {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let has_dependency = |name: &str| {
        ["dependencies", "devDependencies"]
            .iter()
            .any(|section| manifest.get(section).and_then(|deps| deps.get(name)).is_some())
    };

    if has_dependency("@nestjs/core") {
        return Ok(Some(ProjectType::Nest));
    }
    if has_dependency("express") {
        return Ok(Some(ProjectType::Express));
    }
    Ok(None)
}
