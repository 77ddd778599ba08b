//! HTTP endpoint discovery for Spring, Express, NestJS, Gin, Echo and FastAPI
//! projects.
//!
//! Each workspace root is classified by its manifest files, scanned by the
//! matching ecosystem scanner, and the merged result is published as one
//! [`ScanReport`] that can be searched by path, class or handler name.
//!
//! ```no_run
//! use std::path::PathBuf;
//! use apinav::{Config, EndpointProvider};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let roots = vec![PathBuf::from("./services/users")];
//!     let provider = EndpointProvider::from_config(&Config::default(), roots)?;
//!     provider.scan_workspace().await?;
//!
//!     for endpoint in provider.search_endpoints("users") {
//!         println!("{} {}", endpoint.api_path, endpoint.location());
//!     }
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod detector;
pub mod error;
pub mod model;
pub mod output;
pub mod path;
pub mod provider;
pub mod scanner;

pub use cache::ContentCache;
pub use config::{Config, ScannerConfig};
pub use detector::ProjectTypeDetector;
pub use error::ScanError;
pub use model::{ApiEndpoint, HttpMethod, Language, ProjectType, RootReport, ScanReport};
pub use path::combine_paths;
pub use provider::{EndpointProvider, ScanStatus, WorkspaceRoots};
pub use scanner::{default_registry, EcosystemScanner, Scanner, ScannerRegistry};
