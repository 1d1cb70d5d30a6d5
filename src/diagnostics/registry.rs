//! Static registry of diagnostic rules.

use super::code_out_of_region::CodeOutOfRegion;
use super::info::DiagnosticInfo;
use super::visitor::DiagnosticRule;

/// A registered rule: metadata plus a factory for fresh instances.
#[derive(Clone, Copy)]
pub struct RegisteredRule {
    pub info: &'static DiagnosticInfo,
    pub factory: fn() -> Box<dyn DiagnosticRule>,
}

impl RegisteredRule {
    pub fn create(&self) -> Box<dyn DiagnosticRule> {
        (self.factory)()
    }
}

impl std::fmt::Debug for RegisteredRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("RegisteredRule").field(&self.info.code).finish()
    }
}

static RULES: &[RegisteredRule] = &[RegisteredRule {
    info: &CodeOutOfRegion::INFO,
    factory: CodeOutOfRegion::boxed,
}];

/// Every known rule, in reporting order
pub fn registry() -> &'static [RegisteredRule] {
    RULES
}

/// Look up a rule by code
pub fn find_rule(code: &str) -> Option<&'static RegisteredRule> {
    RULES.iter().find(|rule| rule.info.code == code)
}
