//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the syntax tree.
//! It follows the structure of the BSL module grammar.

/// All syntax kinds (tokens and nodes) of a BSL module
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation).
/// Nodes are composite (subroutines, statements, preprocessor lines).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (hidden channel)
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,              // Имя, name
    NUMBER,             // 42, 3.14
    STRING,             // "text" (may span lines with `|`)
    DATE,               // '20200101'

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_PAREN,            // (
    R_PAREN,            // )
    L_BRACKET,          // [
    R_BRACKET,          // ]
    SEMICOLON,          // ;
    COLON,              // :
    COMMA,              // ,
    DOT,                // .
    EQ,                 // =
    NOT_EQ,             // <>
    LT,                 // <
    GT,                 // >
    LT_EQ,              // <=
    GT_EQ,              // >=
    PLUS,               // +
    MINUS,              // -
    STAR,               // *
    SLASH,              // /
    PERCENT,            // %
    QUESTION,           // ?
    AMP,                // &
    HASH,               // #
    TILDE,              // ~

    // =========================================================================
    // KEYWORDS (English and Russian spellings map to the same kind)
    // =========================================================================
    PROCEDURE_KW,
    END_PROCEDURE_KW,
    FUNCTION_KW,
    END_FUNCTION_KW,
    VAR_KW,
    EXPORT_KW,
    VAL_KW,
    IF_KW,
    THEN_KW,
    ELSIF_KW,
    ELSE_KW,
    END_IF_KW,
    WHILE_KW,
    DO_KW,
    END_DO_KW,
    FOR_KW,
    EACH_KW,
    IN_KW,
    TO_KW,
    RETURN_KW,
    CONTINUE_KW,
    BREAK_KW,
    TRY_KW,
    EXCEPT_KW,
    END_TRY_KW,
    RAISE_KW,
    GOTO_KW,
    AND_KW,
    OR_KW,
    NOT_KW,
    TRUE_KW,
    FALSE_KW,
    UNDEFINED_KW,
    NULL_KW,
    NEW_KW,

    // =========================================================================
    // NODES - module structure
    // =========================================================================
    FILE,
    MODULE_VARS,
    MODULE_VAR,
    MODULE_VAR_LIST,
    MODULE_VAR_DECLARATION,
    VAR_NAME,
    FILE_CODE_BLOCK_BEFORE_SUB,
    FILE_CODE_BLOCK,
    SUBS,
    SUB,
    PROCEDURE,
    FUNCTION,
    PROC_DECLARATION,
    FUNC_DECLARATION,
    SUB_NAME,
    PARAM_LIST,
    PARAM,
    SUB_CODE_BLOCK,
    SUB_VARS,
    COMPILER_DIRECTIVE,

    // =========================================================================
    // NODES - statements
    // =========================================================================
    CODE_BLOCK,
    STATEMENT,
    ASSIGNMENT,
    LVALUE,
    CALL_STATEMENT,
    IF_STATEMENT,
    IF_BRANCH,
    ELSIF_BRANCH,
    ELSE_BRANCH,
    WHILE_STATEMENT,
    FOR_STATEMENT,
    FOR_EACH_STATEMENT,
    TRY_STATEMENT,
    EXCEPT_BLOCK,
    RETURN_STATEMENT,
    CONTINUE_STATEMENT,
    BREAK_STATEMENT,
    RAISE_STATEMENT,
    GOTO_STATEMENT,
    LABEL,

    // =========================================================================
    // NODES - expressions
    // =========================================================================
    EXPRESSION,
    GLOBAL_METHOD_CALL,
    CALL_PARAM_LIST,
    TERNARY_OPERATOR,

    // =========================================================================
    // NODES - preprocessor
    // =========================================================================
    PREPROCESSOR,
    REGION_START,
    REGION_END,
    REGION_NAME,
    PREPROC_IF,
    PREPROC_ELSIF,
    PREPROC_ELSE,
    PREPROC_ENDIF,
    PREPROC_OTHER,
    CONDITIONAL_COMPILATION,

    // =========================================================================
    // SPECIAL
    // =========================================================================
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (hidden channel)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::LINE_COMMENT)
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::PROCEDURE_KW as u16) && (self as u16) <= (Self::NEW_KW as u16)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_PAREN as u16) && (self as u16) <= (Self::TILDE as u16)
    }

    /// Check if this is a literal
    pub fn is_literal(self) -> bool {
        matches!(self, Self::NUMBER | Self::STRING | Self::DATE)
    }

    /// Keywords that close or split a code block.
    pub fn is_block_terminator(self) -> bool {
        matches!(
            self,
            Self::END_PROCEDURE_KW
                | Self::END_FUNCTION_KW
                | Self::ELSIF_KW
                | Self::ELSE_KW
                | Self::END_IF_KW
                | Self::END_DO_KW
                | Self::EXCEPT_KW
                | Self::END_TRY_KW
        )
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BslLanguage {}

impl rowan::Language for BslLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<BslLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<BslLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<BslLanguage>;
pub type SyntaxNodeChildren = rowan::SyntaxNodeChildren<BslLanguage>;
