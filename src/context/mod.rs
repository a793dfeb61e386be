//! Build context module
//!
//! Provides the solution/project snapshot used for macro resolution:
//! - Project tree arena with solution folders
//! - Providers (static snapshot, TOML solution manifest)
//! - Project selection strategies

pub mod manifest;
pub mod model;
pub mod provider;
pub mod selector;

pub use manifest::Manifest;
pub use model::*;
pub use provider::{
    BuildContextProvider, ManifestContextProvider, SolutionSnapshot, StaticContextProvider,
};
pub use selector::{PathPrefixMatcher, ProjectMatcher, ProjectSelector, SubstringMatcher};
