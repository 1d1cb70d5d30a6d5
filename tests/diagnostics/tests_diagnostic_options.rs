//! Rule selection through analysis options.

use std::sync::Arc;

use bsl::diagnostics::registry;
use bsl::{
    AnalysisOptions, DiagnosticsMode, DiagnosticsOptions, DocumentContext, DocumentUri, Language,
    ServerContext,
};
use smol_str::SmolStr;

use crate::helpers::context_helpers::BSL_URI;
use crate::helpers::source_fixtures::MODULE_WITHOUT_REGIONS;

fn document_with(options: AnalysisOptions) -> DocumentContext {
    let server = Arc::new(ServerContext::new(options));
    DocumentContext::new(DocumentUri::from(BSL_URI), MODULE_WITHOUT_REGIONS, server)
}

#[test]
fn test_default_options_run_registered_rules() {
    let cx = document_with(AnalysisOptions::default());
    let diagnostics = cx.diagnostics().unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(&*diagnostics[0].message, "Код расположен вне области");
    assert!(registry().iter().any(|rule| rule.info.code == diagnostics[0].code));
}

#[test]
fn test_diagnostics_off() {
    let cx = document_with(AnalysisOptions {
        language: Language::English,
        diagnostics: DiagnosticsOptions {
            mode: DiagnosticsMode::Off,
            ..Default::default()
        },
    });
    assert!(cx.diagnostics().unwrap().is_empty());
}

#[test]
fn test_rule_switched_off() {
    let mut diagnostics = DiagnosticsOptions::default();
    diagnostics
        .rules
        .insert(SmolStr::new("CodeOutOfRegion"), false);
    let cx = document_with(AnalysisOptions {
        language: Language::English,
        diagnostics,
    });
    assert!(cx.diagnostics().unwrap().is_empty());
}
