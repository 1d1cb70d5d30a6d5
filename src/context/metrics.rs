//! Module size and complexity metrics.

use indexmap::IndexSet;

use super::DocumentContext;
use super::computer::Computer;
use crate::error::Result;
use crate::parser::SyntaxKind;

/// Metrics of one module. Line numbers are 1-based.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricStorage {
    pub procedures: usize,
    pub functions: usize,
    /// Lines holding code
    pub ncloc: usize,
    pub ncloc_data: Vec<usize>,
    /// Lines where execution coverage is meaningful
    pub covloc_data: Vec<usize>,
    pub lines: usize,
    pub comments: usize,
    pub statements: usize,
    pub cognitive_complexity: u32,
    pub cyclomatic_complexity: u32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsComputer;

impl Computer for MetricsComputer {
    type Output = MetricStorage;

    fn compute(&self, cx: &DocumentContext) -> Result<MetricStorage> {
        let symbols = cx.symbol_tree()?;
        let syntax = cx.syntax()?;

        let functions = symbols.methods().iter().filter(|m| m.is_function).count();
        let procedures = symbols.methods().len() - functions;

        let ncloc_data: Vec<usize> = syntax
            .tokens_from_default_channel()
            .map(|t| t.line)
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect();

        let root = syntax.root();
        let covloc_data: Vec<usize> = root
            .descendants()
            .filter(|n| {
                matches!(
                    n.kind(),
                    SyntaxKind::STATEMENT | SyntaxKind::GLOBAL_METHOD_CALL | SyntaxKind::VAR_NAME
                )
            })
            .map(|n| syntax.line_index().line_of(n.text_range().start()) + 1)
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect();

        // The line after the last token, like an end-of-file marker
        let lines = syntax
            .tokens()
            .last()
            .map_or(0, |t| t.span.end.line + 1);

        let comments = syntax
            .comments()
            .map(|t| t.line)
            .collect::<IndexSet<_>>()
            .len();

        let statements = root
            .descendants()
            .filter(|n| n.kind() == SyntaxKind::STATEMENT)
            .count();

        Ok(MetricStorage {
            procedures,
            functions,
            ncloc: ncloc_data.len(),
            ncloc_data,
            covloc_data,
            lines,
            comments,
            statements,
            cognitive_complexity: cx.cognitive_complexity_data()?.file_complexity,
            cyclomatic_complexity: cx.cyclomatic_complexity_data()?.file_complexity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics() {
        let cx = DocumentContext::for_test(
            "\
// Модуль
Перем А;

Процедура П()
    Сообщить(\"привет\"); // вывод
КонецПроцедуры

Функция Ф()
    Возврат 1;
КонецФункции
",
        );
        let metrics = MetricsComputer.compute(&cx).unwrap();

        assert_eq!(metrics.procedures, 1);
        assert_eq!(metrics.functions, 1);
        assert_eq!(metrics.ncloc_data, vec![2, 4, 5, 6, 8, 9, 10]);
        assert_eq!(metrics.ncloc, 7);
        assert_eq!(metrics.covloc_data, vec![2, 5, 9]);
        assert_eq!(metrics.lines, 11);
        assert_eq!(metrics.comments, 2);
        assert_eq!(metrics.statements, 2);
        assert_eq!(metrics.cyclomatic_complexity, 2);
        assert_eq!(metrics.cognitive_complexity, 0);
    }

    #[test]
    fn test_empty_document() {
        let cx = DocumentContext::for_test("");
        let metrics = MetricsComputer.compute(&cx).unwrap();
        assert_eq!(metrics, MetricStorage::default());
    }
}
