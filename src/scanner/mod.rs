//! Per-ecosystem endpoint scanners.
//!
//! This module provides the [`Scanner`] trait and [`EcosystemScanner`], the
//! implementation shared by every supported web framework. Each framework is
//! a data table ([`EcosystemSpec`]) compiled into a [`LineEngine`].
//!
//! # Available Ecosystems
//!
//! | Spec | Framework | Files |
//! |------|-----------|-------|
//! | [`SPRING`] | Spring MVC / Spring Boot | `.java` |
//! | [`EXPRESS`] | Express | `.js`, `.ts` |
//! | [`NEST`] | NestJS | `.ts` |
//! | [`GIN`] | Gin | `.go` |
//! | [`ECHO`] | Echo | `.go` |
//! | [`FASTAPI`] | FastAPI | `.py` |
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use apinav::{Config, ContentCache, ProjectType};
//! use apinav::scanner::default_registry;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let registry = default_registry(&Config::default(), Arc::new(ContentCache::default()))?;
//!     if let Some(scanner) = registry.get(ProjectType::Gin) {
//!         let endpoints = scanner.scan("./my-service".as_ref()).await?;
//!         println!("Found {} endpoints", endpoints.len());
//!     }
//!     Ok(())
//! }
//! ```

mod echo;
pub mod engine;
mod express;
mod fastapi;
mod gin;
mod nest;
mod registry;
mod spring;

pub use echo::ECHO;
pub use engine::{EcosystemSpec, LineEngine};
pub use express::EXPRESS;
pub use fastapi::FASTAPI;
pub use gin::GIN;
pub use nest::NEST;
pub use registry::{default_registry, ScannerRegistry};
pub use spring::SPRING;

use async_trait::async_trait;
use futures::future::join_all;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::cache::ContentCache;
use crate::config::ScannerConfig;
use crate::error::{Result, ScanError};
use crate::model::{ApiEndpoint, ProjectType};

/// Extracts endpoints from one ecosystem's source files.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use apinav::{ContentCache, ScannerConfig};
/// use apinav::scanner::{EcosystemScanner, Scanner, SPRING};
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let config = ScannerConfig::new(["java"], ["test"], None);
///     let scanner = EcosystemScanner::new(SPRING, config, Arc::new(ContentCache::default()))?;
///
///     for endpoint in scanner.scan("./backend".as_ref()).await? {
///         println!("{} -> {}", endpoint.api_path, endpoint.handler());
///     }
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait Scanner: Send + Sync {
    /// Returns the human-readable name of this scanner.
    fn name(&self) -> &'static str;

    /// Returns the ecosystem this scanner handles.
    fn project_type(&self) -> ProjectType;

    /// Scans every candidate file under `root`.
    ///
    /// Files that cannot be read are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` itself cannot be walked.
    async fn scan(&self, root: &Path) -> Result<Vec<ApiEndpoint>>;

    /// Cheap pre-filter. Must accept every file for which
    /// [`parse_file`](Self::parse_file) would return endpoints.
    fn is_valid_file(&self, content: &str) -> bool;

    /// Extracts endpoints from one file's content.
    fn parse_file(&self, content: &str, file_path: &Path) -> Vec<ApiEndpoint>;
}

/// Returns the built-in specs in display order.
pub fn all_ecosystems() -> [&'static EcosystemSpec; 6] {
    [&SPRING, &EXPRESS, &NEST, &GIN, &ECHO, &FASTAPI]
}

/// Returns the built-in spec for a project type.
pub fn ecosystem_for(project_type: ProjectType) -> Option<&'static EcosystemSpec> {
    all_ecosystems()
        .into_iter()
        .find(|spec| spec.project_type == project_type)
}

/// Walks a root, filters files by extension, exclusion and size, and runs
/// the ecosystem's [`LineEngine`] on each file concurrently.
#[derive(Clone)]
pub struct EcosystemScanner {
    engine: Arc<LineEngine>,
    config: Arc<ScannerConfig>,
    cache: Arc<ContentCache>,
}

impl EcosystemScanner {
    /// # Errors
    ///
    /// Returns [`ScanError::Pattern`] if one of the ecosystem's patterns does
    /// not compile.
    pub fn new(
        spec: EcosystemSpec,
        config: ScannerConfig,
        cache: Arc<ContentCache>,
    ) -> Result<Self> {
        Ok(Self {
            engine: Arc::new(LineEngine::new(spec)?),
            config: Arc::new(config),
            cache,
        })
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Lists files under `root` with an accepted extension, in path order.
    ///
    /// Exclusion patterns are matched against the path relative to `root`,
    /// and excluded directories are not descended into.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::RootNotFound`] if `root` is not a directory.
    pub async fn list_candidate_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !tokio::fs::metadata(root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
        {
            return Err(ScanError::RootNotFound(root.to_path_buf()));
        }

        let root = root.to_path_buf();
        let config = Arc::clone(&self.config);
        tokio::task::spawn_blocking(move || collect_candidates(&root, &config))
            .await
            .map_err(|e| ScanError::Task(e.to_string()))
    }

    /// Returns true if the file is within the configured size ceiling.
    ///
    /// The file is read in full (through the cache) to decide.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Io`] if the file cannot be read.
    pub async fn validate_size(&self, path: &Path) -> Result<bool> {
        Ok(self.read_within_limit(path).await?.is_some())
    }

    async fn read_within_limit(&self, path: &Path) -> Result<Option<Arc<str>>> {
        let content = self.cache.read(path).await?;
        let fits = self
            .config
            .max_file_size_bytes
            .map_or(true, |max| content.len() as u64 <= max);
        Ok(fits.then_some(content))
    }

    async fn process_file(&self, path: &Path) -> Vec<ApiEndpoint> {
        match self.read_within_limit(path).await {
            Ok(Some(content)) if self.is_valid_file(&content) => self.parse_file(&content, path),
            Ok(Some(_)) => Vec::new(),
            Ok(None) => {
                warn!(path = %path.display(), "file exceeds size limit, skipping");
                Vec::new()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read file, skipping");
                Vec::new()
            }
        }
    }
}

fn collect_candidates(root: &Path, config: &ScannerConfig) -> Vec<PathBuf> {
    let excluded = |path: &Path| {
        let relative = path.strip_prefix(root).unwrap_or(path);
        config.is_excluded(&relative.to_string_lossy())
    };

    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !excluded(entry.path()))
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && config.accepts_extension(entry.path()))
        .map(|entry| entry.into_path())
        .collect()
}

#[async_trait]
impl Scanner for EcosystemScanner {
    fn name(&self) -> &'static str {
        self.engine.spec().name
    }

    fn project_type(&self) -> ProjectType {
        self.engine.spec().project_type
    }

    async fn scan(&self, root: &Path) -> Result<Vec<ApiEndpoint>> {
        let files = self.list_candidate_files(root).await?;
        debug!(
            scanner = self.name(),
            root = %root.display(),
            files = files.len(),
            "scanning candidate files"
        );

        let tasks: Vec<_> = files
            .into_iter()
            .map(|file| {
                let scanner = self.clone();
                tokio::spawn(async move { scanner.process_file(&file).await })
            })
            .collect();

        let mut endpoints = Vec::new();
        for outcome in join_all(tasks).await {
            match outcome {
                Ok(found) => endpoints.extend(found),
                Err(e) => warn!(scanner = self.name(), error = %e, "file task failed"),
            }
        }
        Ok(endpoints)
    }

    fn is_valid_file(&self, content: &str) -> bool {
        self.engine.is_valid_file(content)
    }

    fn parse_file(&self, content: &str, file_path: &Path) -> Vec<ApiEndpoint> {
        self.engine.parse_file(content, file_path)
    }
}
