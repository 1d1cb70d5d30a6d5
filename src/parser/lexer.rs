//! Logos-based lexer for BSL
//!
//! Fast tokenization using the logos crate. Identifiers are promoted to
//! keywords afterwards because BSL keywords are case-insensitive and bilingual.

use super::keywords::keyword_kind;
use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(LogosToken::Ident) => keyword_kind(text).unwrap_or(SyntaxKind::IDENT),
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n\u{FEFF}\u{A0}]+")]
    Whitespace,

    #[regex(r"//[^\r\n]*")]
    LineComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[\p{L}_][\p{L}\p{N}_]*")]
    Ident,

    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,

    #[regex(r#""([^"]|"")*""#)]
    String,

    #[regex(r"'[^'\r\n]*'")]
    Date,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION (must come before single-char)
    // =========================================================================
    #[token("<>")]
    NotEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("?")]
    Question,
    #[token("&")]
    Amp,
    #[token("#")]
    Hash,
    #[token("~")]
    Tilde,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            Whitespace => SyntaxKind::WHITESPACE,
            LineComment => SyntaxKind::LINE_COMMENT,

            Ident => SyntaxKind::IDENT,
            Number => SyntaxKind::NUMBER,
            String => SyntaxKind::STRING,
            Date => SyntaxKind::DATE,

            NotEq => SyntaxKind::NOT_EQ,
            LtEq => SyntaxKind::LT_EQ,
            GtEq => SyntaxKind::GT_EQ,

            LParen => SyntaxKind::L_PAREN,
            RParen => SyntaxKind::R_PAREN,
            LBracket => SyntaxKind::L_BRACKET,
            RBracket => SyntaxKind::R_BRACKET,
            Semicolon => SyntaxKind::SEMICOLON,
            Colon => SyntaxKind::COLON,
            Comma => SyntaxKind::COMMA,
            Dot => SyntaxKind::DOT,
            Eq => SyntaxKind::EQ,
            Lt => SyntaxKind::LT,
            Gt => SyntaxKind::GT,
            Plus => SyntaxKind::PLUS,
            Minus => SyntaxKind::MINUS,
            Star => SyntaxKind::STAR,
            Slash => SyntaxKind::SLASH,
            Percent => SyntaxKind::PERCENT,
            Question => SyntaxKind::QUESTION,
            Amp => SyntaxKind::AMP,
            Hash => SyntaxKind::HASH,
            Tilde => SyntaxKind::TILDE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<SyntaxKind> {
        tokenize(input).iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_lex_module_var() {
        let tokens = tokenize("Перем А Экспорт;");
        assert_eq!(tokens.len(), 6); // Перем, ws, А, ws, Экспорт, ;
        assert_eq!(tokens[0].kind, SyntaxKind::VAR_KW);
        assert_eq!(tokens[2].kind, SyntaxKind::IDENT);
        assert_eq!(tokens[2].text, "А");
        assert_eq!(tokens[4].kind, SyntaxKind::EXPORT_KW);
        assert_eq!(tokens[5].kind, SyntaxKind::SEMICOLON);
    }

    #[test]
    fn test_lex_english_keywords_any_case() {
        assert_eq!(
            kinds("PROCEDURE Test() EndProcedure"),
            vec![
                SyntaxKind::PROCEDURE_KW,
                SyntaxKind::WHITESPACE,
                SyntaxKind::IDENT,
                SyntaxKind::L_PAREN,
                SyntaxKind::R_PAREN,
                SyntaxKind::WHITESPACE,
                SyntaxKind::END_PROCEDURE_KW,
            ]
        );
    }

    #[test]
    fn test_lex_comment_and_region() {
        let kinds = kinds("// comment\n#Область Имя");
        assert_eq!(kinds[0], SyntaxKind::LINE_COMMENT);
        assert_eq!(kinds[1], SyntaxKind::WHITESPACE);
        assert_eq!(kinds[2], SyntaxKind::HASH);
        assert_eq!(kinds[3], SyntaxKind::IDENT);
    }

    #[test]
    fn test_lex_literals() {
        assert_eq!(
            kinds(r#"1.5 "a""b" '20200101'"#),
            vec![
                SyntaxKind::NUMBER,
                SyntaxKind::WHITESPACE,
                SyntaxKind::STRING,
                SyntaxKind::WHITESPACE,
                SyntaxKind::DATE,
            ]
        );
    }

    #[test]
    fn test_lex_multiline_string() {
        let tokens = tokenize("\"first\n|second\";");
        assert_eq!(tokens[0].kind, SyntaxKind::STRING);
        assert_eq!(tokens[1].kind, SyntaxKind::SEMICOLON);
    }

    #[test]
    fn test_lex_comparison_operators() {
        assert_eq!(
            kinds("<><=>=<>"),
            vec![
                SyntaxKind::NOT_EQ,
                SyntaxKind::LT_EQ,
                SyntaxKind::GT_EQ,
                SyntaxKind::NOT_EQ,
            ]
        );
    }

    #[test]
    fn test_offsets_are_byte_offsets() {
        let tokens = tokenize("А = 1;");
        assert_eq!(tokens[0].offset, TextSize::new(0));
        assert_eq!(tokens[1].offset, TextSize::new(2));
    }
}
