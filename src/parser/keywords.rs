//! Keyword tables.
//!
//! BSL keywords are case-insensitive and have English and Russian spellings.
//! The lexer produces identifiers; this module promotes them to keyword kinds.

use super::syntax_kind::SyntaxKind;

/// Every keyword spelling (lowercase) with its kind.
pub const KEYWORDS: &[(&str, SyntaxKind)] = &[
    ("procedure", SyntaxKind::PROCEDURE_KW),
    ("процедура", SyntaxKind::PROCEDURE_KW),
    ("endprocedure", SyntaxKind::END_PROCEDURE_KW),
    ("конецпроцедуры", SyntaxKind::END_PROCEDURE_KW),
    ("function", SyntaxKind::FUNCTION_KW),
    ("функция", SyntaxKind::FUNCTION_KW),
    ("endfunction", SyntaxKind::END_FUNCTION_KW),
    ("конецфункции", SyntaxKind::END_FUNCTION_KW),
    ("var", SyntaxKind::VAR_KW),
    ("перем", SyntaxKind::VAR_KW),
    ("export", SyntaxKind::EXPORT_KW),
    ("экспорт", SyntaxKind::EXPORT_KW),
    ("val", SyntaxKind::VAL_KW),
    ("знач", SyntaxKind::VAL_KW),
    ("if", SyntaxKind::IF_KW),
    ("если", SyntaxKind::IF_KW),
    ("then", SyntaxKind::THEN_KW),
    ("тогда", SyntaxKind::THEN_KW),
    ("elsif", SyntaxKind::ELSIF_KW),
    ("иначеесли", SyntaxKind::ELSIF_KW),
    ("else", SyntaxKind::ELSE_KW),
    ("иначе", SyntaxKind::ELSE_KW),
    ("endif", SyntaxKind::END_IF_KW),
    ("конецесли", SyntaxKind::END_IF_KW),
    ("while", SyntaxKind::WHILE_KW),
    ("пока", SyntaxKind::WHILE_KW),
    ("do", SyntaxKind::DO_KW),
    ("цикл", SyntaxKind::DO_KW),
    ("enddo", SyntaxKind::END_DO_KW),
    ("конеццикла", SyntaxKind::END_DO_KW),
    ("for", SyntaxKind::FOR_KW),
    ("для", SyntaxKind::FOR_KW),
    ("each", SyntaxKind::EACH_KW),
    ("каждого", SyntaxKind::EACH_KW),
    ("in", SyntaxKind::IN_KW),
    ("из", SyntaxKind::IN_KW),
    ("to", SyntaxKind::TO_KW),
    ("по", SyntaxKind::TO_KW),
    ("return", SyntaxKind::RETURN_KW),
    ("возврат", SyntaxKind::RETURN_KW),
    ("continue", SyntaxKind::CONTINUE_KW),
    ("продолжить", SyntaxKind::CONTINUE_KW),
    ("break", SyntaxKind::BREAK_KW),
    ("прервать", SyntaxKind::BREAK_KW),
    ("try", SyntaxKind::TRY_KW),
    ("попытка", SyntaxKind::TRY_KW),
    ("except", SyntaxKind::EXCEPT_KW),
    ("исключение", SyntaxKind::EXCEPT_KW),
    ("endtry", SyntaxKind::END_TRY_KW),
    ("конецпопытки", SyntaxKind::END_TRY_KW),
    ("raise", SyntaxKind::RAISE_KW),
    ("вызватьисключение", SyntaxKind::RAISE_KW),
    ("goto", SyntaxKind::GOTO_KW),
    ("перейти", SyntaxKind::GOTO_KW),
    ("and", SyntaxKind::AND_KW),
    ("и", SyntaxKind::AND_KW),
    ("or", SyntaxKind::OR_KW),
    ("или", SyntaxKind::OR_KW),
    ("not", SyntaxKind::NOT_KW),
    ("не", SyntaxKind::NOT_KW),
    ("true", SyntaxKind::TRUE_KW),
    ("истина", SyntaxKind::TRUE_KW),
    ("false", SyntaxKind::FALSE_KW),
    ("ложь", SyntaxKind::FALSE_KW),
    ("undefined", SyntaxKind::UNDEFINED_KW),
    ("неопределено", SyntaxKind::UNDEFINED_KW),
    ("null", SyntaxKind::NULL_KW),
    ("new", SyntaxKind::NEW_KW),
    ("новый", SyntaxKind::NEW_KW),
];

/// Look up the keyword kind of an identifier, ignoring case.
pub fn keyword_kind(ident: &str) -> Option<SyntaxKind> {
    let lower = ident.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(spelling, _)| *spelling == lower)
        .map(|(_, kind)| *kind)
}

/// Kind of a preprocessor instruction, identified by the word after `#`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreprocessorWord {
    Region,
    EndRegion,
    If,
    ElsIf,
    Else,
    EndIf,
    Other,
}

impl PreprocessorWord {
    pub fn from_ident(ident: &str) -> Self {
        match ident.to_lowercase().as_str() {
            "region" | "область" => Self::Region,
            "endregion" | "конецобласти" => Self::EndRegion,
            "if" | "если" => Self::If,
            "elsif" | "иначеесли" => Self::ElsIf,
            "else" | "иначе" => Self::Else,
            "endif" | "конецесли" => Self::EndIf,
            _ => Self::Other,
        }
    }

    /// Node kind wrapping the instruction inside a `PREPROCESSOR` node.
    pub fn node_kind(self) -> SyntaxKind {
        match self {
            Self::Region => SyntaxKind::REGION_START,
            Self::EndRegion => SyntaxKind::REGION_END,
            Self::If => SyntaxKind::PREPROC_IF,
            Self::ElsIf => SyntaxKind::PREPROC_ELSIF,
            Self::Else => SyntaxKind::PREPROC_ELSE,
            Self::EndIf => SyntaxKind::PREPROC_ENDIF,
            Self::Other => SyntaxKind::PREPROC_OTHER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Procedure", SyntaxKind::PROCEDURE_KW)]
    #[case("ПРОЦЕДУРА", SyntaxKind::PROCEDURE_KW)]
    #[case("КонецФункции", SyntaxKind::END_FUNCTION_KW)]
    #[case("ИначеЕсли", SyntaxKind::ELSIF_KW)]
    #[case("И", SyntaxKind::AND_KW)]
    #[case("or", SyntaxKind::OR_KW)]
    fn test_keyword_kind(#[case] text: &str, #[case] expected: SyntaxKind) {
        assert_eq!(keyword_kind(text), Some(expected));
    }

    #[test]
    fn test_plain_identifier_is_not_keyword() {
        assert_eq!(keyword_kind("Область"), None);
        assert_eq!(keyword_kind("Значение"), None);
    }

    #[test]
    fn test_preprocessor_words() {
        assert_eq!(PreprocessorWord::from_ident("Область"), PreprocessorWord::Region);
        assert_eq!(PreprocessorWord::from_ident("EndRegion"), PreprocessorWord::EndRegion);
        assert_eq!(PreprocessorWord::from_ident("КонецЕсли"), PreprocessorWord::EndIf);
        assert_eq!(PreprocessorWord::from_ident("Использовать"), PreprocessorWord::Other);
    }
}
