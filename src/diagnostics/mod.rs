//! Diagnostic rule engine.
//!
//! ## Structure
//!
//! - [`DiagnosticInfo`] - static registration metadata of a rule
//! - [`DiagnosticRule`] / [`TreeVisitor`] - rules walking the parse tree
//! - [`DiagnosticSink`] - per-run accumulator turning nodes into [`Diagnostic`]s
//! - [`registry`] - every known rule with a factory for fresh instances
//! - [`DiagnosticComputer`] - runs the applicable rules over a document
//!
//! Rules are stateless between runs: the computer creates one instance per
//! rule per document, so rules may keep scratch state in `&mut self`.

mod code_out_of_region;
mod computer;
mod info;
mod registry;
mod sink;
mod types;
mod visitor;

pub use code_out_of_region::CodeOutOfRegion;
pub use computer::DiagnosticComputer;
pub use info::{
    CompatibilityMode, DiagnosticInfo, DiagnosticScope, DiagnosticSeverity, DiagnosticTag,
    DiagnosticType,
};
pub use registry::{RegisteredRule, find_rule, registry};
pub use sink::DiagnosticSink;
pub use types::{Diagnostic, Severity};
pub use visitor::{DiagnosticRule, TreeVisitor, Walk, walk};
