//! Analysis options

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::diagnostics::{CompatibilityMode, DiagnosticInfo, DiagnosticSeverity};

/// Options for analysing BSL documents
#[derive(Debug, Clone, Default)]
pub struct AnalysisOptions {
    /// Language of diagnostic messages
    pub language: Language,
    pub diagnostics: DiagnosticsOptions,
}

/// Language of user-facing messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    English,
    #[default]
    Russian,
}

/// Which diagnostics run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DiagnosticsMode {
    /// Rules activated by default, adjusted by [`DiagnosticsOptions::rules`]
    #[default]
    On,
    /// No diagnostics at all
    Off,
    /// Only the listed rules
    Only(Vec<SmolStr>),
    /// Every rule except the listed ones
    Except(Vec<SmolStr>),
}

/// Diagnostic selection options
#[derive(Debug, Clone)]
pub struct DiagnosticsOptions {
    pub mode: DiagnosticsMode,
    /// Rules below this severity are skipped
    pub minimum_severity: DiagnosticSeverity,
    /// Platform compatibility mode of the project; rules requiring a newer
    /// mode are skipped. `None` disables the check.
    pub compatibility_mode: Option<CompatibilityMode>,
    /// Per-rule switch overriding default activation in [`DiagnosticsMode::On`]
    pub rules: IndexMap<SmolStr, bool>,
}

impl Default for DiagnosticsOptions {
    fn default() -> Self {
        Self {
            mode: DiagnosticsMode::On,
            minimum_severity: DiagnosticSeverity::Info,
            compatibility_mode: None,
            rules: IndexMap::new(),
        }
    }
}

impl DiagnosticsOptions {
    /// Whether the rule described by `info` should run
    pub fn is_enabled(&self, info: &DiagnosticInfo) -> bool {
        if info.severity < self.minimum_severity {
            return false;
        }
        if let Some(mode) = self.compatibility_mode {
            if info.compatibility_mode > mode {
                return false;
            }
        }

        match &self.mode {
            DiagnosticsMode::Off => false,
            DiagnosticsMode::On => self
                .rules
                .get(info.code)
                .copied()
                .unwrap_or(info.activated_by_default),
            DiagnosticsMode::Only(codes) => codes.iter().any(|code| code == info.code),
            DiagnosticsMode::Except(codes) => !codes.iter().any(|code| code == info.code),
        }
    }
}
