//! Registration metadata of diagnostic rules.
//!
//! Metadata is consumed for filtering and reporting only; it never changes
//! how a rule walks the tree.

use std::fmt;

use super::types::Severity;
use crate::base::FileType;
use crate::config::Language;

/// Category of a finding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiagnosticType {
    CodeSmell,
    Error,
    Vulnerability,
    SecurityHotspot,
}

/// Rule-level severity, ordered from least to most severe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticSeverity {
    Info,
    Minor,
    Major,
    Critical,
    Blocker,
}

/// Kinds of source files a rule applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiagnosticScope {
    All,
    Bsl,
    Os,
}

impl DiagnosticScope {
    pub fn applies_to(self, file_type: FileType) -> bool {
        match self {
            DiagnosticScope::All => true,
            DiagnosticScope::Bsl => file_type == FileType::Bsl,
            DiagnosticScope::Os => file_type == FileType::Os,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiagnosticTag {
    Standard,
    LockReliable,
    Performance,
    Unpredictable,
    Suspicious,
    BadPractice,
    Brainoverload,
    Clumsy,
    Design,
    Error,
    Sql,
    Deprecated,
}

/// Platform version a rule requires (e.g. `8.3.1`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct CompatibilityMode {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl CompatibilityMode {
    /// No version requirement.
    pub const UNDEFINED: CompatibilityMode = CompatibilityMode::new(0, 0, 0);

    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for CompatibilityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Static registration record of one rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticInfo {
    pub code: &'static str,
    pub diagnostic_type: DiagnosticType,
    pub severity: DiagnosticSeverity,
    pub scope: DiagnosticScope,
    pub minutes_to_fix: u32,
    pub tags: &'static [DiagnosticTag],
    pub compatibility_mode: CompatibilityMode,
    pub activated_by_default: bool,
    pub message_en: &'static str,
    pub message_ru: &'static str,
}

impl DiagnosticInfo {
    pub fn message(&self, language: Language) -> &'static str {
        match language {
            Language::English => self.message_en,
            Language::Russian => self.message_ru,
        }
    }

    /// Severity of reported diagnostics.
    ///
    /// Errors and vulnerabilities are always LSP errors; code smells scale
    /// with the rule severity.
    pub fn lsp_severity(&self) -> Severity {
        match self.diagnostic_type {
            DiagnosticType::Error | DiagnosticType::Vulnerability => Severity::Error,
            DiagnosticType::SecurityHotspot => Severity::Warning,
            DiagnosticType::CodeSmell => match self.severity {
                DiagnosticSeverity::Info => Severity::Hint,
                DiagnosticSeverity::Minor => Severity::Information,
                DiagnosticSeverity::Major => Severity::Warning,
                DiagnosticSeverity::Critical | DiagnosticSeverity::Blocker => Severity::Error,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INFO: DiagnosticInfo = DiagnosticInfo {
        code: "Sample",
        diagnostic_type: DiagnosticType::CodeSmell,
        severity: DiagnosticSeverity::Major,
        scope: DiagnosticScope::Bsl,
        minutes_to_fix: 5,
        tags: &[DiagnosticTag::Standard],
        compatibility_mode: CompatibilityMode::UNDEFINED,
        activated_by_default: true,
        message_en: "Sample message",
        message_ru: "Пример сообщения",
    };

    #[test]
    fn test_message_language() {
        assert_eq!(INFO.message(Language::English), "Sample message");
        assert_eq!(INFO.message(Language::Russian), "Пример сообщения");
    }

    #[test]
    fn test_lsp_severity() {
        assert_eq!(INFO.lsp_severity(), Severity::Warning);
        let error = DiagnosticInfo {
            diagnostic_type: DiagnosticType::Error,
            ..INFO
        };
        assert_eq!(error.lsp_severity(), Severity::Error);
    }

    #[test]
    fn test_scope_and_compatibility() {
        assert!(DiagnosticScope::Bsl.applies_to(FileType::Bsl));
        assert!(!DiagnosticScope::Bsl.applies_to(FileType::Os));
        assert!(DiagnosticScope::All.applies_to(FileType::Os));
        assert!(CompatibilityMode::new(8, 3, 1) > CompatibilityMode::new(8, 2, 16));
        assert_eq!(CompatibilityMode::new(8, 3, 1).to_string(), "8.3.1");
    }
}
