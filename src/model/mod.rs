//! Core data types for discovered endpoints and scan results.
//!
//! This module contains the fundamental types used throughout apinav:
//!
//! - [`ApiEndpoint`] - A discovered HTTP route and its handler location
//! - [`HttpMethod`] - The verb a route answers to
//! - [`Language`] - The source language the route was found in
//! - [`ProjectType`] - The detected ecosystem of a workspace root
//! - [`ScanReport`] - One complete generation of scan results
//!
//! # Example
//!
//! ```
//! use apinav::{ApiEndpoint, HttpMethod, Language, ScanReport};
//!
//! let endpoint = ApiEndpoint::new("/api/users", "src/UserController.java", 12, Language::Java)
//!     .with_handler("UserController", "list")
//!     .with_method(Some(HttpMethod::Get));
//! let report = ScanReport::new(Vec::new(), vec![endpoint]);
//!
//! println!("Found {} endpoints", report.endpoints.len());
//! ```

mod endpoint;
mod report;

pub use endpoint::*;
pub use report::*;
