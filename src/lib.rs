//! # ddms
//!
//! A validated, versioned object model for DDMS metadata components.
//!
//! Every component can be built two ways: parsed from an XML element, or
//! assembled from raw values. Both paths end in the same validation, so a
//! constructed component is always valid for the DDMS version it was built
//! for. Components render to canonical XML, HTML meta tags, plain text and
//! JSON.
//!
//! ## Features
//!
//! - DDMS 2.0, 3.0, 3.1, 4.0.1, 4.1 and 5.0, with per-version names and namespaces
//! - Security (ISM), XLink and extensible attribute bundles
//! - Mutable builders that round-trip with their components
//! - Advisory warnings located with dot-joined element paths
//!
//! ## Example
//!
//! ```rust,ignore
//! use ddms::{DdmsComponent, Version};
//! use ddms::elements::Rights;
//!
//! let rights = Rights::new(Version::V5_0, true, false, false)?;
//! assert_eq!(rights.to_text()?, "rights.privacyAct: true\nrights.intellectualProperty: false\nrights.copyright: false\n");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod config;
pub mod error;
pub mod version;

// XML plumbing
pub mod datatypes;
pub mod documents;
pub mod names;
pub mod namespaces;

// Component model
pub mod bundles;
pub mod component;
pub mod elements;
pub mod output;

// Re-exports for convenience
pub use bundles::{ExtensibleAttributes, SecurityAttributes, SrsAttributes, XLinkAttributes};
pub use component::{Builder, BuilderList, Component, DdmsComponent};
pub use config::{OutputConfig, Properties};
pub use error::{Error, Result, ValidationError, ValidationMessage};
pub use output::OutputFormat;
pub use version::{Version, VersionRegistry};

/// Version of the ddms library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
