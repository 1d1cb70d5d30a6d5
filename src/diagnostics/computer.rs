//! Runs the applicable rules over a document.

use std::sync::Arc;

use rayon::prelude::*;
use tracing::{trace, warn};

use super::info::DiagnosticInfo;
use super::registry::{RegisteredRule, registry};
use super::sink::DiagnosticSink;
use super::types::Diagnostic;
use crate::config::{AnalysisOptions, Language};
use crate::context::{Computer, DocumentContext};
use crate::error::Result;
use crate::syntax::SyntaxFile;

type RuleFilter = dyn Fn(&DiagnosticInfo) -> bool + Send + Sync;

/// Computes the diagnostics of a document.
///
/// Rules run in parallel, each as a fresh instance; results are merged in
/// registration order and filtered through `// BSLLS` suppressions.
pub struct DiagnosticComputer {
    rules: Vec<RegisteredRule>,
    filter: Arc<RuleFilter>,
    language: Language,
}

impl DiagnosticComputer {
    /// Registered rules selected by the diagnostics options
    pub fn new(options: &AnalysisOptions) -> Self {
        let diagnostics = options.diagnostics.clone();
        Self::with_rules(registry().to_vec(), options.language, move |info| {
            diagnostics.is_enabled(info)
        })
    }

    /// Custom rule set and filter
    pub fn with_rules(
        rules: Vec<RegisteredRule>,
        language: Language,
        filter: impl Fn(&DiagnosticInfo) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            rules,
            filter: Arc::new(filter),
            language,
        }
    }

    /// Rules that apply to `cx`, in registration order
    pub fn applicable_rules(&self, cx: &DocumentContext) -> Vec<&RegisteredRule> {
        self.rules
            .iter()
            .filter(|rule| rule.info.scope.applies_to(cx.file_type()))
            .filter(|rule| (self.filter)(rule.info))
            .collect()
    }

    fn run_rule(
        &self,
        rule: &RegisteredRule,
        cx: &DocumentContext,
        syntax: &SyntaxFile,
    ) -> Result<Vec<Diagnostic>> {
        trace!(uri = %cx.uri(), code = rule.info.code, "running diagnostic");
        let mut sink = DiagnosticSink::new(rule.info, syntax, self.language);
        rule.create()
            .check(cx, &mut sink)
            .inspect_err(|err| warn!(uri = %cx.uri(), code = rule.info.code, error = %err, "diagnostic failed"))?;
        Ok(sink.into_diagnostics())
    }
}

impl Computer for DiagnosticComputer {
    type Output = Vec<Diagnostic>;

    /// Run every applicable rule once.
    ///
    /// Called under the document's diagnostics lock. Rules fan out over the
    /// rayon pool only when the caller is not itself a rayon worker: a worker
    /// waiting on the fan-out may steal an unrelated job that re-enters the
    /// same document's diagnostics lock, so on workers the rules run
    /// sequentially instead.
    fn compute(&self, cx: &DocumentContext) -> Result<Vec<Diagnostic>> {
        let syntax = cx.syntax()?;
        let ignorance = cx.diagnostic_ignorance()?;

        let rules = self.applicable_rules(cx);
        let run = |rule: &&RegisteredRule| self.run_rule(rule, cx, &syntax);
        let results: Vec<Result<Vec<Diagnostic>>> = if rayon::current_thread_index().is_some() {
            trace!(uri = %cx.uri(), "running diagnostics sequentially on a rayon worker");
            rules.iter().map(run).collect()
        } else {
            rules.par_iter().map(run).collect()
        };

        let mut diagnostics = Vec::new();
        for result in results {
            diagnostics.extend(
                result?
                    .into_iter()
                    .filter(|d| !ignorance.is_ignored(d.code, d.start_line())),
            );
        }
        Ok(diagnostics)
    }
}

impl std::fmt::Debug for DiagnosticComputer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticComputer")
            .field("rules", &self.rules)
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}
