//! Scenarios of the code-out-of-region rule.

use bsl::{Severity, Span};

use crate::helpers::context_helpers::os_document;
use crate::helpers::diagnostic_helpers::{assert_no_diagnostics, diagnostics_of, ranges};
use crate::helpers::source_fixtures::*;

const CODE: &str = "CodeOutOfRegion";

#[test]
fn test_module_without_regions_is_reported_once() {
    let found = diagnostics_of(MODULE_WITHOUT_REGIONS, CODE);
    assert_eq!(ranges(&found), vec![Span::from_coords(0, 0, 1, 14)]);
    assert_eq!(&*found[0].message, "Code out of region");
    assert_eq!(found[0].severity, Severity::Hint);
}

#[test]
fn test_empty_and_comment_only_modules() {
    assert_no_diagnostics("", CODE);
    assert_no_diagnostics("\n\n", CODE);
    assert_no_diagnostics("// только комментарий\n// и ещё один", CODE);
}

#[test]
fn test_module_in_regions() {
    assert_no_diagnostics(MODULE_IN_REGIONS, CODE);
}

#[test]
fn test_method_outside_region() {
    let found = diagnostics_of(METHOD_OUTSIDE_REGION, CODE);
    assert_eq!(ranges(&found), vec![Span::from_coords(5, 10, 5, 11)]);
}

#[test]
fn test_method_in_nested_region() {
    let source = "\
#Область Внешняя
#Область Внутренняя
Процедура А()
КонецПроцедуры
#КонецОбласти
#КонецОбласти";
    assert_no_diagnostics(source, CODE);
}

#[test]
fn test_module_variable_outside_region() {
    let found = diagnostics_of(MODULE_VAR_OUTSIDE_REGION, CODE);
    assert_eq!(ranges(&found), vec![Span::from_coords(0, 0, 0, 8)]);
}

#[test]
fn test_module_variable_after_preprocessor_line() {
    let source = "\
#Если Сервер Тогда
Перем А;
#КонецЕсли
#Область Переменные
Перем Б;
#КонецОбласти";
    let found = diagnostics_of(source, CODE);
    assert_eq!(ranges(&found), vec![Span::from_coords(1, 0, 1, 8)]);
}

#[test]
fn test_statements_outside_region() {
    let source = "\
#Область Основная
А = 1;
#КонецОбласти
Б = 2;
В = 3;";
    let found = diagnostics_of(source, CODE);
    assert_eq!(
        ranges(&found),
        vec![Span::from_coords(3, 0, 3, 6), Span::from_coords(4, 0, 4, 6)]
    );
}

#[test]
fn test_statement_in_conditional_compilation_is_skipped() {
    assert_no_diagnostics(STATEMENT_IN_CONDITIONAL_COMPILATION, CODE);
}

#[test]
fn test_region_suppressed_by_comment() {
    let source = "\
#Область Основная
#КонецОбласти
// BSLLS:CodeOutOfRegion-off
Процедура А()
КонецПроцедуры";
    assert_no_diagnostics(source, CODE);
}

#[test]
fn test_onescript_files_are_out_of_scope() {
    let cx = os_document(MODULE_WITHOUT_REGIONS);
    assert!(cx.diagnostics().unwrap().is_empty());
}
