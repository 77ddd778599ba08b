//! Workspace-level endpoint collection.
//!
//! [`EndpointProvider`] detects the ecosystem of every workspace root, runs
//! the matching scanner on all roots concurrently and publishes the merged
//! result as one immutable [`ScanReport`]. Readers always see either the
//! previous report or the new one in full.

use futures::future::join_all;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use crate::cache::ContentCache;
use crate::config::Config;
use crate::detector::ProjectTypeDetector;
use crate::error::Result;
use crate::model::{ApiEndpoint, RootReport, ScanReport};
use crate::scanner::{default_registry, ScannerRegistry};

/// Source of workspace root directories.
pub trait WorkspaceRoots: Send + Sync {
    /// # Errors
    ///
    /// Implementations return [`ScanError::Workspace`](crate::ScanError::Workspace) when the roots
    /// cannot be enumerated.
    fn roots(&self) -> Result<Vec<PathBuf>>;
}

impl WorkspaceRoots for Vec<PathBuf> {
    fn roots(&self) -> Result<Vec<PathBuf>> {
        Ok(self.clone())
    }
}

/// Result of a [`scan_workspace`](EndpointProvider::scan_workspace) call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStatus {
    /// A new report was published.
    Completed { endpoints: usize },
    /// Another scan was already running; nothing changed.
    Rejected,
}

/// Clears the scanning flag when dropped.
struct ScanGuard<'a>(&'a AtomicBool);

impl<'a> ScanGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for ScanGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct EndpointProvider {
    registry: Arc<ScannerRegistry>,
    detector: ProjectTypeDetector,
    roots: Box<dyn WorkspaceRoots>,
    current: RwLock<Arc<ScanReport>>,
    scanning: AtomicBool,
    last_scan: Mutex<Option<Instant>>,
    stale_after: Duration,
}

impl EndpointProvider {
    pub fn new(registry: ScannerRegistry, roots: impl WorkspaceRoots + 'static) -> Self {
        Self {
            registry: Arc::new(registry),
            detector: ProjectTypeDetector::new(),
            roots: Box::new(roots),
            current: RwLock::new(Arc::new(ScanReport::empty())),
            scanning: AtomicBool::new(false),
            last_scan: Mutex::new(None),
            stale_after: Duration::from_secs(300),
        }
    }

    /// Builds a provider with the built-in scanners, a shared content cache
    /// and the staleness window from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in scanner fails to compile.
    pub fn from_config(config: &Config, roots: impl WorkspaceRoots + 'static) -> Result<Self> {
        let cache = Arc::new(ContentCache::new(config.cache.max_entries));
        let registry = default_registry(config, cache)?;
        Ok(Self::new(registry, roots).with_stale_after(config.cache.stale_after()))
    }

    pub fn with_stale_after(mut self, stale_after: Duration) -> Self {
        self.stale_after = stale_after;
        self
    }

    pub fn is_scanning(&self) -> bool {
        self.scanning.load(Ordering::Acquire)
    }

    /// The most recently published report.
    pub fn snapshot(&self) -> Arc<ScanReport> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn endpoints(&self) -> Vec<ApiEndpoint> {
        self.snapshot().endpoints.clone()
    }

    /// Case-insensitive substring search over path, class and method name
    /// of the current collection.
    pub fn search_endpoints(&self, query: &str) -> Vec<ApiEndpoint> {
        self.snapshot().search(query)
    }

    /// Rescans every workspace root and replaces the collection.
    ///
    /// A call made while another scan is running returns
    /// [`ScanStatus::Rejected`] without touching the collection. A root
    /// whose scan fails contributes no endpoints, and its error is recorded
    /// in its [`RootReport`].
    ///
    /// # Errors
    ///
    /// Returns the error from [`WorkspaceRoots::roots`]; the previous
    /// collection stays published.
    pub async fn scan_workspace(&self) -> Result<ScanStatus> {
        let Some(_guard) = ScanGuard::acquire(&self.scanning) else {
            debug!("workspace scan already in progress, request dropped");
            return Ok(ScanStatus::Rejected);
        };

        let roots = self.roots.roots().map_err(|e| {
            error!(error = %e, "failed to enumerate workspace roots");
            e
        })?;
        let started = Instant::now();

        let tasks: Vec<_> = roots
            .into_iter()
            .map(|root| {
                let registry = Arc::clone(&self.registry);
                let detector = self.detector;
                tokio::spawn(async move { scan_root(detector, &registry, root).await })
            })
            .collect();

        let mut reports = Vec::new();
        let mut endpoints = Vec::new();
        for outcome in join_all(tasks).await {
            match outcome {
                Ok((report, found)) => {
                    reports.push(report);
                    endpoints.extend(found);
                }
                Err(e) => warn!(error = %e, "workspace root task failed"),
            }
        }

        let count = endpoints.len();
        let report = Arc::new(ScanReport::new(reports, endpoints));
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = report;
        *self.last_scan.lock().unwrap_or_else(PoisonError::into_inner) = Some(Instant::now());

        info!(
            endpoints = count,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "workspace scan complete"
        );
        Ok(ScanStatus::Completed { endpoints: count })
    }

    /// True if no scan has completed yet or the last one is older than the
    /// staleness window.
    pub fn is_stale(&self) -> bool {
        self.last_scan
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .map_or(true, |at| at.elapsed() >= self.stale_after)
    }

    /// Rescans if the collection is stale, then returns the current report.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`scan_workspace`](Self::scan_workspace).
    pub async fn refresh_if_stale(&self) -> Result<Arc<ScanReport>> {
        if self.is_stale() {
            self.scan_workspace().await?;
        }
        Ok(self.snapshot())
    }
}

async fn scan_root(
    detector: ProjectTypeDetector,
    registry: &ScannerRegistry,
    root: PathBuf,
) -> (RootReport, Vec<ApiEndpoint>) {
    let project_type = detector.detect(&root).await;
    let mut report = RootReport {
        path: root.clone(),
        project_type,
        endpoint_count: 0,
        error: None,
    };

    let Some(scanner) = registry.get(project_type) else {
        debug!(root = %root.display(), %project_type, "no scanner for project type");
        return (report, Vec::new());
    };

    match scanner.scan(&root).await {
        Ok(found) => {
            debug!(
                root = %root.display(),
                scanner = scanner.name(),
                endpoints = found.len(),
                "root scanned"
            );
            report.endpoint_count = found.len();
            (report, found)
        }
        Err(e) => {
            warn!(root = %root.display(), scanner = scanner.name(), error = %e, "root scan failed");
            report.error = Some(e.to_string());
            (report, Vec::new())
        }
    }
}
