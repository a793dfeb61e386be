//! Macro resolution module
//!
//! Substitutes `$(Name)` build macros in task names and working directories.

pub mod external;
pub mod resolver;

pub use external::{ChainedMacros, ExternalMacros, NoExternalMacros, PropertyMacros};
pub use resolver::{unresolved_tokens, VariableMap, VariableResolver};
