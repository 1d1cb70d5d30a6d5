//! DocumentContext behaviour through the public API.

use std::sync::Arc;

use bsl::context::ModuleType;
use bsl::{ContextError, DocumentUri, Position, ServerContext, Span};

use crate::helpers::context_helpers::{BSL_URI, bsl_document};
use crate::helpers::source_fixtures::{BRANCHY_METHOD, MODULE_IN_REGIONS};

#[test]
fn test_text_round_trips_every_line() {
    let cx = bsl_document(MODULE_IN_REGIONS);
    let lines = cx.content_list().unwrap();

    for (index, line) in lines.iter().enumerate() {
        let span = Span::from_coords(index, 0, index, line.chars().count());
        assert_eq!(&cx.text(span).unwrap(), line);
    }

    let last = lines.len() - 1;
    let whole = Span::from_coords(0, 0, last, lines[last].chars().count());
    assert_eq!(cx.text(whole).unwrap(), MODULE_IN_REGIONS);
}

#[test]
fn test_text_counts_characters_not_bytes() {
    let cx = bsl_document("Перем Счетчик;");
    let span = Span::new(Position::new(0, 6), Position::new(0, 13));
    assert_eq!(cx.text(span).unwrap(), "Счетчик");
}

#[test]
fn test_text_rejects_lines_past_the_end() {
    let cx = bsl_document("А = 1;");
    let err = cx.text(Span::from_coords(0, 0, 5, 0)).unwrap_err();
    assert_eq!(
        err,
        ContextError::OutOfBounds {
            line: 5,
            line_count: 1
        }
    );
}

#[test]
fn test_symbol_tree_of_regions() {
    let cx = bsl_document(MODULE_IN_REGIONS);
    let symbols = cx.symbol_tree().unwrap();

    let regions: Vec<_> = symbols
        .file_level_regions()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(
        regions,
        vec!["ПеременныеМодуля", "ПрограммныйИнтерфейс", "Инициализация"]
    );

    let method = symbols.method_by_name("увеличить").unwrap();
    assert!(method.export);
    let region = symbols.region(method.region.unwrap());
    assert_eq!(region.name, "ПрограммныйИнтерфейс");

    assert_eq!(symbols.variables().len(), 1);
    assert_eq!(symbols.variables()[0].name, "Счетчик");
}

#[test]
fn test_complexity_views() {
    let cx = bsl_document(BRANCHY_METHOD);

    let cyclomatic = cx.cyclomatic_complexity_data().unwrap();
    let cognitive = cx.cognitive_complexity_data().unwrap();

    let method_cyclomatic = cyclomatic.methods_complexity["Оценка"];
    assert!(method_cyclomatic > 1);
    assert!(cognitive.methods_complexity["Оценка"] > 0);
    assert_eq!(cyclomatic.file_code_block_complexity, 0);

    let metrics = cx.metrics().unwrap();
    assert_eq!(metrics.functions, 1);
    assert_eq!(metrics.cyclomatic_complexity, cyclomatic.file_complexity);
    assert_eq!(metrics.cognitive_complexity, cognitive.file_complexity);
}

#[test]
fn test_rebuild_replaces_every_text_view() {
    let cx = bsl_document("Процедура А()\nКонецПроцедуры");
    let metrics = cx.metrics().unwrap();
    let content = cx.content_list().unwrap();
    assert_eq!(metrics.procedures, 1);

    cx.rebuild("А = 1;\nБ = 2;\nВ = 3;");

    let rebuilt = cx.metrics().unwrap();
    assert!(!Arc::ptr_eq(&metrics, &rebuilt));
    assert_eq!(rebuilt.procedures, 0);
    assert_eq!(rebuilt.statements, 3);
    assert!(!Arc::ptr_eq(&content, &cx.content_list().unwrap()));
    assert_eq!(&*cx.content().unwrap(), "А = 1;\nБ = 2;\nВ = 3;");
    assert!(cx.symbol_tree().unwrap().methods().is_empty());
}

#[test]
fn test_rebuild_after_clear_restores_content() {
    let cx = bsl_document("А = 1;");
    cx.clear_secondary_data();
    assert!(matches!(
        cx.content_list().unwrap_err(),
        ContextError::ContentUnavailable { .. }
    ));
    assert!(cx.diagnostics().is_err());

    cx.rebuild("Б = 2;");
    assert_eq!(cx.content_list().unwrap().len(), 1);
    assert_eq!(cx.diagnostics().unwrap().len(), 1);
}

#[test]
fn test_module_type_comes_from_configuration() {
    let server = Arc::new(ServerContext::default());
    let uri = DocumentUri::from(BSL_URI);
    server.update_configuration(|config| {
        config.set_module_type(uri.clone(), ModuleType::CommonModule);
    });

    let cx = bsl::DocumentContext::new(uri, "", Arc::clone(&server));
    assert_eq!(*cx.module_type().unwrap(), ModuleType::CommonModule);
}

#[test]
fn test_configuration_lookup_normalizes_uri() {
    let server = Arc::new(ServerContext::default());
    server.update_configuration(|config| {
        config.set_module_type(
            DocumentUri::from("file:///src/Module.bsl"),
            ModuleType::CommonModule,
        );
    });

    for spelling in [
        "FILE:///src/Module.bsl",
        "file://localhost/src/Module.bsl",
        "file:///src/x/../Module.bsl",
    ] {
        let cx = bsl::DocumentContext::new(DocumentUri::from(spelling), "", Arc::clone(&server));
        assert_eq!(*cx.module_type().unwrap(), ModuleType::CommonModule, "{spelling}");
        assert_eq!(cx.uri().path(), "/src/Module.bsl");
    }
}
