use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use super::{all_ecosystems, EcosystemScanner, Scanner};
use crate::cache::ContentCache;
use crate::config::Config;
use crate::error::Result;
use crate::model::ProjectType;

/// Maps each project type to the scanner responsible for it.
#[derive(Default, Clone)]
pub struct ScannerRegistry {
    scanners: HashMap<ProjectType, Arc<dyn Scanner>>,
}

impl ScannerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `scanner` for `project_type`, replacing any previous one.
    pub fn register(&mut self, project_type: ProjectType, scanner: Arc<dyn Scanner>) {
        self.scanners.insert(project_type, scanner);
    }

    pub fn get(&self, project_type: ProjectType) -> Option<Arc<dyn Scanner>> {
        self.scanners.get(&project_type).cloned()
    }

    pub fn supported_types(&self) -> BTreeSet<ProjectType> {
        self.scanners.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.scanners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scanners.is_empty()
    }
}

/// Builds a registry with one [`EcosystemScanner`] per built-in ecosystem,
/// all sharing `cache`.
///
/// # Errors
///
/// Returns an error if a built-in spec fails to compile.
pub fn default_registry(config: &Config, cache: Arc<ContentCache>) -> Result<ScannerRegistry> {
    let mut registry = ScannerRegistry::new();
    for spec in all_ecosystems() {
        let Some(settings) = config.scanners.get(spec.project_type) else {
            continue;
        };
        let scanner = EcosystemScanner::new(*spec, settings.clone(), Arc::clone(&cache))?;
        registry.register(spec.project_type, Arc::new(scanner));
    }
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScannerConfig;
    use crate::scanner::{ECHO, GIN};

    #[test]
    fn test_default_registry_covers_every_supported_type() {
        let cache = Arc::new(ContentCache::default());
        let registry = default_registry(&Config::default(), cache).unwrap();
        assert_eq!(registry.len(), 6);
        assert_eq!(
            registry.supported_types(),
            ProjectType::SUPPORTED.into_iter().collect::<BTreeSet<_>>()
        );
        assert!(registry.get(ProjectType::Unknown).is_none());
        assert_eq!(registry.get(ProjectType::Echo).unwrap().name(), "Echo");
    }

    #[test]
    fn test_register_overwrites() {
        let cache = Arc::new(ContentCache::default());
        let config = ScannerConfig::new(["go"], Vec::<String>::new(), None);
        let mut registry = ScannerRegistry::new();

        registry.register(
            ProjectType::Gin,
            Arc::new(EcosystemScanner::new(GIN, config.clone(), Arc::clone(&cache)).unwrap()),
        );
        registry.register(
            ProjectType::Gin,
            Arc::new(EcosystemScanner::new(ECHO, config, cache).unwrap()),
        );

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(ProjectType::Gin).unwrap().name(), "Echo");
    }
}
