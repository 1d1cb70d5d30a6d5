//! Recursive descent parser for BSL modules
//!
//! Builds a rowan GreenNode tree from tokens.
//! Supports error recovery and produces a lossless CST. Nodes never start or
//! end with trivia: whitespace and comments between nodes belong to the parent.

use super::keywords::PreprocessorWord;
use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use rowan::{GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Parse a BSL module into a CST
pub fn parse(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens);
    parser.parse_file();
    parser.finish()
}

/// Tokens that end an expression regardless of nesting depth.
const EXPRESSION_ENDS: &[SyntaxKind] = &[
    SyntaxKind::SEMICOLON,
    SyntaxKind::THEN_KW,
    SyntaxKind::DO_KW,
    SyntaxKind::TO_KW,
    SyntaxKind::IN_KW,
    SyntaxKind::HASH,
    SyntaxKind::IF_KW,
    SyntaxKind::WHILE_KW,
    SyntaxKind::FOR_KW,
    SyntaxKind::TRY_KW,
    SyntaxKind::RETURN_KW,
    SyntaxKind::CONTINUE_KW,
    SyntaxKind::BREAK_KW,
    SyntaxKind::RAISE_KW,
    SyntaxKind::GOTO_KW,
    SyntaxKind::VAR_KW,
    SyntaxKind::PROCEDURE_KW,
    SyntaxKind::FUNCTION_KW,
    SyntaxKind::EXPORT_KW,
];

/// Tokens that cannot start a statement inside a code block.
const STRAY_IN_BLOCK: &[SyntaxKind] = &[
    SyntaxKind::R_PAREN,
    SyntaxKind::R_BRACKET,
    SyntaxKind::THEN_KW,
    SyntaxKind::DO_KW,
    SyntaxKind::TO_KW,
    SyntaxKind::IN_KW,
    SyntaxKind::COMMA,
    SyntaxKind::COLON,
    SyntaxKind::EXPORT_KW,
    SyntaxKind::AMP,
    SyntaxKind::END_PROCEDURE_KW,
    SyntaxKind::END_FUNCTION_KW,
];

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    /// Index of the first significant token at or after `from`
    fn next_significant(&self, from: usize) -> Option<usize> {
        (from..self.tokens.len()).find(|&idx| !self.tokens[idx].kind.is_trivia())
    }

    /// Kind of the next significant token
    fn peek(&self) -> Option<SyntaxKind> {
        self.peek_nth(0)
    }

    /// Look ahead, skipping trivia
    fn peek_nth(&self, n: usize) -> Option<SyntaxKind> {
        let mut idx = self.pos;
        for _ in 0..n {
            idx = self.next_significant(idx)? + 1;
        }
        self.next_significant(idx).map(|idx| self.tokens[idx].kind)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.peek() == Some(kind)
    }

    fn at_eof(&self) -> bool {
        self.peek().is_none()
    }

    /// Whether a line break separates `from` (inclusive) and the next significant token
    fn newline_between(&self, from: usize, to: usize) -> bool {
        self.tokens[from..to]
            .iter()
            .any(|t| t.kind.is_trivia() && t.text.contains('\n'))
    }

    /// Whether the next significant token starts on a new line (or there is none)
    fn newline_before_next(&self) -> bool {
        match self.next_significant(self.pos) {
            Some(idx) => self.newline_between(self.pos, idx),
            None => true,
        }
    }

    /// Index of the first significant token on a line after the one holding `idx`
    fn next_line_start(&self, idx: usize) -> Option<usize> {
        let mut seen_newline = false;
        for (offset, token) in self.tokens[idx + 1..].iter().enumerate() {
            if token.kind.is_trivia() {
                seen_newline |= token.text.contains('\n');
            } else if seen_newline {
                return Some(idx + 1 + offset);
            }
        }
        None
    }

    /// Index of the first significant token after a `&Directive(...)` starting at `idx`
    fn skip_directive(&self, idx: usize) -> Option<usize> {
        let name = self.next_significant(idx + 1)?;
        let mut next = self.next_significant(name + 1)?;
        if self.tokens[next].kind == SyntaxKind::L_PAREN {
            let mut depth = 0usize;
            loop {
                match self.tokens[next].kind {
                    SyntaxKind::L_PAREN => depth += 1,
                    SyntaxKind::R_PAREN => {
                        depth -= 1;
                        if depth == 0 {
                            break;
                        }
                    }
                    _ => {}
                }
                next = self.next_significant(next + 1)?;
            }
            next = self.next_significant(next + 1)?;
        }
        Some(next)
    }

    /// Kind of the first token after any preprocessor lines and compiler directives
    fn kind_after_prelude(&self) -> Option<SyntaxKind> {
        let mut idx = self.next_significant(self.pos)?;
        loop {
            match self.tokens[idx].kind {
                SyntaxKind::HASH => idx = self.next_line_start(idx)?,
                SyntaxKind::AMP => idx = self.skip_directive(idx)?,
                kind => return Some(kind),
            }
        }
    }

    fn at_sub_start(&self) -> bool {
        matches!(
            self.kind_after_prelude(),
            Some(SyntaxKind::PROCEDURE_KW | SyntaxKind::FUNCTION_KW)
        )
    }

    /// Instruction word of the preprocessor line starting at the next token
    fn preprocessor_word_ahead(&self) -> PreprocessorWord {
        let Some(hash) = self.next_significant(self.pos) else {
            return PreprocessorWord::Other;
        };
        match self.next_significant(hash + 1) {
            Some(word) if !self.newline_between(hash + 1, word) => {
                PreprocessorWord::from_ident(self.tokens[word].text)
            }
            _ => PreprocessorWord::Other,
        }
    }

    /// Scan the rest of the statement for an `=` outside of brackets
    fn assignment_ahead(&self) -> bool {
        let mut depth = 0usize;
        let mut idx = self.pos;
        while let Some(next) = self.next_significant(idx) {
            let kind = self.tokens[next].kind;
            match kind {
                SyntaxKind::EQ if depth == 0 => return true,
                SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET => depth += 1,
                SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET => {
                    if depth == 0 {
                        return false;
                    }
                    depth -= 1;
                }
                _ if EXPRESSION_ENDS.contains(&kind) || kind.is_block_terminator() => {
                    return false;
                }
                _ => {}
            }
            idx = next + 1;
        }
        false
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    /// Attach pending trivia to the currently open node
    fn bump_trivia(&mut self) {
        while let Some(token) = self.current() {
            if !token.kind.is_trivia() {
                break;
            }
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    /// Consume pending trivia and the next significant token
    fn bump(&mut self) {
        self.bump_trivia();
        if let Some(token) = self.current() {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {:?}", kind));
            false
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: impl Into<String>) {
        let range = self
            .next_significant(self.pos)
            .map(|idx| {
                let t = &self.tokens[idx];
                TextRange::at(t.offset, TextSize::of(t.text))
            })
            .or_else(|| {
                self.tokens
                    .last()
                    .map(|t| TextRange::empty(t.offset + TextSize::of(t.text)))
            })
            .unwrap_or_else(|| TextRange::empty(TextSize::new(0)));
        self.errors.push(SyntaxError::new(message, range));
    }

    /// Report an error and wrap the next token in an ERROR node
    fn error_bump(&mut self, message: impl Into<String>) {
        self.error(message);
        self.start_node(SyntaxKind::ERROR);
        self.bump();
        self.finish_node();
    }

    /// Report an error and wrap everything up to the next `;` in an ERROR node
    fn error_recover_statement(&mut self, message: impl Into<String>) {
        self.error(message);
        self.start_node(SyntaxKind::ERROR);
        while let Some(kind) = self.peek() {
            if kind == SyntaxKind::SEMICOLON || kind.is_block_terminator() {
                break;
            }
            self.bump();
        }
        self.finish_node();
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    /// Start a node at the next significant token; trivia stays in the parent
    fn start_node(&mut self, kind: SyntaxKind) {
        self.bump_trivia();
        self.builder.start_node(kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    // =========================================================================
    // Module structure
    // =========================================================================

    /// File = ModuleVars? FileCodeBlockBeforeSub (Subs FileCodeBlock)*
    fn parse_file(&mut self) {
        self.builder.start_node(SyntaxKind::FILE.into());

        if self.kind_after_prelude() == Some(SyntaxKind::VAR_KW) {
            self.parse_module_vars();
        }

        self.parse_file_code_block(SyntaxKind::FILE_CODE_BLOCK_BEFORE_SUB);

        let mut has_subs = false;
        while self.at_sub_start() {
            if has_subs {
                self.error("subroutines must be declared before the module body");
            }
            self.parse_subs();
            self.parse_file_code_block(SyntaxKind::FILE_CODE_BLOCK);
            has_subs = true;
        }
        if !has_subs {
            self.parse_file_code_block(SyntaxKind::FILE_CODE_BLOCK);
        }

        self.bump_trivia();
        self.finish_node();
    }

    /// ModuleVars = (ModuleVar | Preprocessor)+
    fn parse_module_vars(&mut self) {
        self.start_node(SyntaxKind::MODULE_VARS);

        while self.kind_after_prelude() == Some(SyntaxKind::VAR_KW) {
            if self.at(SyntaxKind::HASH) {
                self.parse_preprocessor();
            } else {
                self.parse_module_var();
            }
        }

        self.finish_node();
    }

    /// ModuleVar = CompilerDirective* 'Var' ModuleVarList ';'?
    fn parse_module_var(&mut self) {
        self.start_node(SyntaxKind::MODULE_VAR);

        while self.at(SyntaxKind::AMP) {
            self.parse_compiler_directive();
        }
        self.expect(SyntaxKind::VAR_KW);

        self.start_node(SyntaxKind::MODULE_VAR_LIST);
        loop {
            self.start_node(SyntaxKind::MODULE_VAR_DECLARATION);
            self.parse_var_name();
            self.eat(SyntaxKind::EXPORT_KW);
            self.finish_node();
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        self.finish_node();

        self.eat(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    fn parse_var_name(&mut self) {
        if self.at(SyntaxKind::IDENT) {
            self.start_node(SyntaxKind::VAR_NAME);
            self.bump();
            self.finish_node();
        } else {
            self.error("expected variable name");
        }
    }

    /// CompilerDirective = '&' Ident ('(' ... ')')?
    fn parse_compiler_directive(&mut self) {
        self.start_node(SyntaxKind::COMPILER_DIRECTIVE);
        self.expect(SyntaxKind::AMP);
        if self.newline_before_next() {
            self.error("expected compiler directive name");
        } else {
            self.bump();
        }
        if self.at(SyntaxKind::L_PAREN) {
            let mut depth = 0usize;
            while let Some(kind) = self.peek() {
                self.bump();
                match kind {
                    SyntaxKind::L_PAREN => depth += 1,
                    SyntaxKind::R_PAREN => {
                        depth -= 1;
                        if depth == 0 {
                            break;
                        }
                    }
                    _ => {}
                }
            }
        }
        self.finish_node();
    }

    fn parse_file_code_block(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.parse_code_block(true);
        self.finish_node();
    }

    /// Subs = (Sub | Preprocessor)+
    fn parse_subs(&mut self) {
        self.start_node(SyntaxKind::SUBS);

        while self.at_sub_start() {
            if self.at(SyntaxKind::HASH) {
                self.parse_preprocessor();
            } else {
                self.parse_sub();
            }
        }

        self.finish_node();
    }

    /// Sub = Procedure | Function
    fn parse_sub(&mut self) {
        let is_function = self.kind_after_prelude() == Some(SyntaxKind::FUNCTION_KW);
        let (kind, declaration, keyword, end_keyword) = if is_function {
            (
                SyntaxKind::FUNCTION,
                SyntaxKind::FUNC_DECLARATION,
                SyntaxKind::FUNCTION_KW,
                SyntaxKind::END_FUNCTION_KW,
            )
        } else {
            (
                SyntaxKind::PROCEDURE,
                SyntaxKind::PROC_DECLARATION,
                SyntaxKind::PROCEDURE_KW,
                SyntaxKind::END_PROCEDURE_KW,
            )
        };

        self.start_node(SyntaxKind::SUB);
        self.start_node(kind);

        self.start_node(declaration);
        while self.at(SyntaxKind::AMP) {
            self.parse_compiler_directive();
        }
        self.expect(keyword);
        if self.at(SyntaxKind::IDENT) {
            self.start_node(SyntaxKind::SUB_NAME);
            self.bump();
            self.finish_node();
        } else {
            self.error("expected subroutine name");
        }
        if self.at(SyntaxKind::L_PAREN) {
            self.parse_param_list();
        } else {
            self.error("expected parameter list");
        }
        self.eat(SyntaxKind::EXPORT_KW);
        self.finish_node();

        self.start_node(SyntaxKind::SUB_CODE_BLOCK);
        if self.at(SyntaxKind::VAR_KW) {
            self.parse_sub_vars();
        }
        self.parse_code_block(false);
        self.finish_node();

        self.expect(end_keyword);

        self.finish_node();
        self.finish_node();
    }

    /// ParamList = '(' (Param (',' Param)*)? ')'
    fn parse_param_list(&mut self) {
        self.start_node(SyntaxKind::PARAM_LIST);
        self.expect(SyntaxKind::L_PAREN);

        while !self.at_eof() && !self.at(SyntaxKind::R_PAREN) {
            self.start_node(SyntaxKind::PARAM);
            self.eat(SyntaxKind::VAL_KW);
            if !self.eat(SyntaxKind::IDENT) {
                self.error("expected parameter name");
            }
            if self.eat(SyntaxKind::EQ) {
                self.parse_expression(&[SyntaxKind::COMMA, SyntaxKind::R_PAREN]);
            }
            self.finish_node();
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }

        self.expect(SyntaxKind::R_PAREN);
        self.finish_node();
    }

    /// SubVars = ('Var' VarName (',' VarName)* ';')+
    fn parse_sub_vars(&mut self) {
        self.start_node(SyntaxKind::SUB_VARS);
        while self.eat(SyntaxKind::VAR_KW) {
            loop {
                self.parse_var_name();
                if !self.eat(SyntaxKind::COMMA) {
                    break;
                }
            }
            self.eat(SyntaxKind::SEMICOLON);
        }
        self.finish_node();
    }

    // =========================================================================
    // Code blocks and preprocessor
    // =========================================================================

    /// CodeBlock = (Statement | Preprocessor | ConditionalCompilation)*
    ///
    /// A top-level block only ends at a subroutine or end of file; stray
    /// block terminators are reported and skipped.
    fn parse_code_block(&mut self, top_level: bool) {
        self.start_node(SyntaxKind::CODE_BLOCK);

        while let Some(kind) = self.peek() {
            if self.at_sub_start() {
                break;
            }
            if kind.is_block_terminator() {
                if top_level {
                    self.error_bump(format!("unexpected {:?}", kind));
                    continue;
                }
                break;
            }
            self.parse_block_item(kind);
        }

        self.finish_node();
    }

    fn parse_block_item(&mut self, kind: SyntaxKind) {
        match kind {
            SyntaxKind::HASH => {
                if self.preprocessor_word_ahead() == PreprocessorWord::If {
                    self.parse_conditional_compilation();
                } else {
                    self.parse_preprocessor();
                }
            }
            _ if STRAY_IN_BLOCK.contains(&kind) => {
                self.error_bump(format!("unexpected {:?}", kind));
            }
            _ => self.parse_statement(),
        }
    }

    /// ConditionalCompilation = '#If' (Statement | Preprocessor)* '#EndIf'
    fn parse_conditional_compilation(&mut self) {
        self.start_node(SyntaxKind::CONDITIONAL_COMPILATION);
        self.parse_preprocessor();

        while let Some(kind) = self.peek() {
            if kind.is_block_terminator() || self.at_sub_start() {
                break;
            }
            if kind == SyntaxKind::HASH
                && self.preprocessor_word_ahead() == PreprocessorWord::EndIf
            {
                self.parse_preprocessor();
                break;
            }
            self.parse_block_item(kind);
        }

        self.finish_node();
    }

    /// Preprocessor = '#' Instruction (rest of line)
    fn parse_preprocessor(&mut self) {
        let word = self.preprocessor_word_ahead();
        self.start_node(SyntaxKind::PREPROCESSOR);
        self.expect(SyntaxKind::HASH);

        if self.newline_before_next() {
            self.builder.start_node(word.node_kind().into());
        } else {
            self.start_node(word.node_kind());
            self.bump();
            if word == PreprocessorWord::Region && !self.newline_before_next() {
                self.start_node(SyntaxKind::REGION_NAME);
                self.bump();
                self.finish_node();
            }
            while !self.newline_before_next() {
                self.bump();
            }
        }
        self.finish_node();

        self.finish_node();
    }

    // =========================================================================
    // Statements
    // =========================================================================

    /// Statement = Label? (Compound | Assignment | Call)? ';'?
    fn parse_statement(&mut self) {
        self.start_node(SyntaxKind::STATEMENT);

        if self.at(SyntaxKind::TILDE) {
            self.parse_label();
            self.eat(SyntaxKind::COLON);
        }

        match self.peek() {
            None | Some(SyntaxKind::SEMICOLON) | Some(SyntaxKind::HASH) => {}
            Some(kind) if kind.is_block_terminator() => {}
            Some(SyntaxKind::IF_KW) => self.parse_if(),
            Some(SyntaxKind::WHILE_KW) => self.parse_while(),
            Some(SyntaxKind::FOR_KW) => {
                if self.peek_nth(1) == Some(SyntaxKind::EACH_KW) {
                    self.parse_for_each();
                } else {
                    self.parse_for();
                }
            }
            Some(SyntaxKind::TRY_KW) => self.parse_try(),
            Some(SyntaxKind::RETURN_KW) => {
                self.parse_keyword_statement(SyntaxKind::RETURN_STATEMENT, true)
            }
            Some(SyntaxKind::RAISE_KW) => {
                self.parse_keyword_statement(SyntaxKind::RAISE_STATEMENT, true)
            }
            Some(SyntaxKind::CONTINUE_KW) => {
                self.parse_keyword_statement(SyntaxKind::CONTINUE_STATEMENT, false)
            }
            Some(SyntaxKind::BREAK_KW) => {
                self.parse_keyword_statement(SyntaxKind::BREAK_STATEMENT, false)
            }
            Some(SyntaxKind::GOTO_KW) => {
                self.start_node(SyntaxKind::GOTO_STATEMENT);
                self.bump();
                if self.at(SyntaxKind::TILDE) {
                    self.parse_label();
                } else {
                    self.error("expected label");
                }
                self.finish_node();
            }
            Some(SyntaxKind::VAR_KW) => {
                self.error_recover_statement("variables must be declared before statements")
            }
            Some(_) => {
                if self.assignment_ahead() {
                    self.parse_assignment();
                } else {
                    self.parse_expression_as(SyntaxKind::CALL_STATEMENT, &[]);
                }
            }
        }

        self.eat(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// Label = '~' Ident
    fn parse_label(&mut self) {
        self.start_node(SyntaxKind::LABEL);
        self.expect(SyntaxKind::TILDE);
        if !self.eat(SyntaxKind::IDENT) {
            self.error("expected label name");
        }
        self.finish_node();
    }

    /// Assignment = LValue '=' Expression
    fn parse_assignment(&mut self) {
        self.start_node(SyntaxKind::ASSIGNMENT);
        self.parse_expression_as(SyntaxKind::LVALUE, &[SyntaxKind::EQ]);
        self.expect(SyntaxKind::EQ);
        self.parse_expression(&[]);
        self.finish_node();
    }

    /// Return / Raise / Continue / Break, optionally followed by an expression
    fn parse_keyword_statement(&mut self, kind: SyntaxKind, with_expression: bool) {
        self.start_node(kind);
        self.bump();
        if with_expression {
            let ends_here = match self.peek() {
                None => true,
                Some(next) => {
                    next == SyntaxKind::SEMICOLON
                        || next.is_block_terminator()
                        || EXPRESSION_ENDS.contains(&next)
                }
            };
            if !ends_here {
                self.parse_expression(&[]);
            }
        }
        self.finish_node();
    }

    /// If = IfBranch ElsIfBranch* ElseBranch? 'EndIf'
    fn parse_if(&mut self) {
        self.start_node(SyntaxKind::IF_STATEMENT);

        self.start_node(SyntaxKind::IF_BRANCH);
        self.expect(SyntaxKind::IF_KW);
        self.parse_expression(&[]);
        self.expect(SyntaxKind::THEN_KW);
        self.parse_code_block(false);
        self.finish_node();

        while self.at(SyntaxKind::ELSIF_KW) {
            self.start_node(SyntaxKind::ELSIF_BRANCH);
            self.bump();
            self.parse_expression(&[]);
            self.expect(SyntaxKind::THEN_KW);
            self.parse_code_block(false);
            self.finish_node();
        }

        if self.at(SyntaxKind::ELSE_KW) {
            self.start_node(SyntaxKind::ELSE_BRANCH);
            self.bump();
            self.parse_code_block(false);
            self.finish_node();
        }

        self.expect(SyntaxKind::END_IF_KW);
        self.finish_node();
    }

    /// While = 'While' Expression 'Do' CodeBlock 'EndDo'
    fn parse_while(&mut self) {
        self.start_node(SyntaxKind::WHILE_STATEMENT);
        self.expect(SyntaxKind::WHILE_KW);
        self.parse_expression(&[]);
        self.expect(SyntaxKind::DO_KW);
        self.parse_code_block(false);
        self.expect(SyntaxKind::END_DO_KW);
        self.finish_node();
    }

    /// For = 'For' Ident '=' Expression 'To' Expression 'Do' CodeBlock 'EndDo'
    fn parse_for(&mut self) {
        self.start_node(SyntaxKind::FOR_STATEMENT);
        self.expect(SyntaxKind::FOR_KW);
        if !self.eat(SyntaxKind::IDENT) {
            self.error("expected loop variable");
        }
        self.expect(SyntaxKind::EQ);
        self.parse_expression(&[]);
        self.expect(SyntaxKind::TO_KW);
        self.parse_expression(&[]);
        self.expect(SyntaxKind::DO_KW);
        self.parse_code_block(false);
        self.expect(SyntaxKind::END_DO_KW);
        self.finish_node();
    }

    /// ForEach = 'For' 'Each' Ident 'In' Expression 'Do' CodeBlock 'EndDo'
    fn parse_for_each(&mut self) {
        self.start_node(SyntaxKind::FOR_EACH_STATEMENT);
        self.expect(SyntaxKind::FOR_KW);
        self.expect(SyntaxKind::EACH_KW);
        if !self.eat(SyntaxKind::IDENT) {
            self.error("expected loop variable");
        }
        self.expect(SyntaxKind::IN_KW);
        self.parse_expression(&[]);
        self.expect(SyntaxKind::DO_KW);
        self.parse_code_block(false);
        self.expect(SyntaxKind::END_DO_KW);
        self.finish_node();
    }

    /// Try = 'Try' CodeBlock ExceptBlock 'EndTry'
    fn parse_try(&mut self) {
        self.start_node(SyntaxKind::TRY_STATEMENT);
        self.expect(SyntaxKind::TRY_KW);
        self.parse_code_block(false);

        if self.at(SyntaxKind::EXCEPT_KW) {
            self.start_node(SyntaxKind::EXCEPT_BLOCK);
            self.bump();
            self.parse_code_block(false);
            self.finish_node();
        } else {
            self.error("expected Except");
        }

        self.expect(SyntaxKind::END_TRY_KW);
        self.finish_node();
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn parse_expression(&mut self, stop: &[SyntaxKind]) {
        self.parse_expression_as(SyntaxKind::EXPRESSION, stop);
    }

    /// Flat expression: tokens up to a terminator, with global method calls
    /// and ternary operators as nested nodes.
    fn parse_expression_as(&mut self, kind: SyntaxKind, stop: &[SyntaxKind]) {
        self.start_node(kind);

        let mut depth = 0usize;
        let mut prev: Option<SyntaxKind> = None;
        while let Some(current) = self.peek() {
            if EXPRESSION_ENDS.contains(&current) || current.is_block_terminator() {
                break;
            }
            if depth == 0 && stop.contains(&current) {
                break;
            }
            match current {
                SyntaxKind::IDENT
                    if self.peek_nth(1) == Some(SyntaxKind::L_PAREN)
                        && !matches!(prev, Some(SyntaxKind::DOT | SyntaxKind::NEW_KW)) =>
                {
                    self.parse_global_method_call();
                }
                SyntaxKind::QUESTION if self.peek_nth(1) == Some(SyntaxKind::L_PAREN) => {
                    self.parse_ternary();
                }
                SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET => {
                    depth += 1;
                    self.bump();
                }
                SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                    self.bump();
                }
                _ => self.bump(),
            }
            prev = Some(current);
        }

        self.finish_node();
    }

    /// GlobalMethodCall = Ident CallParamList
    fn parse_global_method_call(&mut self) {
        self.start_node(SyntaxKind::GLOBAL_METHOD_CALL);
        self.expect(SyntaxKind::IDENT);
        self.parse_call_param_list();
        self.finish_node();
    }

    /// CallParamList = '(' (Expression? (',' Expression?)*)? ')'
    fn parse_call_param_list(&mut self) {
        self.start_node(SyntaxKind::CALL_PARAM_LIST);
        self.expect(SyntaxKind::L_PAREN);

        while let Some(kind) = self.peek() {
            if kind == SyntaxKind::R_PAREN {
                break;
            }
            if kind == SyntaxKind::COMMA {
                self.bump();
                continue;
            }
            let before = self.pos;
            self.parse_expression(&[SyntaxKind::COMMA, SyntaxKind::R_PAREN]);
            if self.pos == before {
                break;
            }
        }

        self.expect(SyntaxKind::R_PAREN);
        self.finish_node();
    }

    /// Ternary = '?' '(' Expression ',' Expression ',' Expression ')'
    fn parse_ternary(&mut self) {
        self.start_node(SyntaxKind::TERNARY_OPERATOR);
        self.expect(SyntaxKind::QUESTION);
        self.expect(SyntaxKind::L_PAREN);
        for idx in 0..3 {
            self.parse_expression(&[SyntaxKind::COMMA, SyntaxKind::R_PAREN]);
            if idx < 2 && !self.expect(SyntaxKind::COMMA) {
                break;
            }
        }
        self.expect(SyntaxKind::R_PAREN);
        self.finish_node();
    }
}
