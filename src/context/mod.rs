//! Document analysis context.
//!
//! - [`DocumentContext`] - per-document cache of derived views
//! - [`Lazy`] - memoized, clearable cell guarded by an external lock
//! - [`computer`] - stateless computers producing each view
//! - [`ServerContext`] - configuration shared by all documents

pub mod computer;
mod document;
mod lazy;
mod metrics;
mod server;
mod symbol;

pub use computer::{
    CognitiveComplexityComputer, ComplexityData, Computer, CyclomaticComplexityComputer,
    DiagnosticIgnoranceComputer, DiagnosticIgnoranceData, SymbolTreeComputer,
};
pub use document::DocumentContext;
pub use lazy::Lazy;
pub use metrics::{MetricStorage, MetricsComputer};
pub use server::{
    Configuration, ModuleType, ServerContext, SupportConfiguration, SupportVariant,
};
pub use symbol::{MethodSymbol, RegionId, RegionSymbol, SymbolTree, VariableSymbol};
