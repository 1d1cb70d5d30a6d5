//! Suppression of diagnostics through `// BSLLS` comments.
//!
//! ```text
//! // BSLLS-off               suppress every rule until `// BSLLS-on`
//! // BSLLS:CodeOutOfRegion-off
//! А = 1; // BSLLS-off        suppress this line only
//! ```

use std::ops::RangeInclusive;

use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;

use super::Computer;
use crate::context::DocumentContext;
use crate::error::Result;

/// Suppressed line ranges (zero-based, inclusive) per rule code.
/// The `None` key suppresses every rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticIgnoranceData {
    ranges: FxHashMap<Option<SmolStr>, Vec<RangeInclusive<usize>>>,
}

impl DiagnosticIgnoranceData {
    /// Whether diagnostics of `code` starting on `line` are suppressed
    pub fn is_ignored(&self, code: &str, line: usize) -> bool {
        let code = Some(SmolStr::new(code.to_lowercase()));
        [&None, &code]
            .into_iter()
            .filter_map(|key| self.ranges.get(key))
            .flatten()
            .any(|range| range.contains(&line))
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    fn add(&mut self, key: Option<SmolStr>, range: RangeInclusive<usize>) {
        self.ranges.entry(key).or_default().push(range);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DiagnosticIgnoranceComputer;

impl Computer for DiagnosticIgnoranceComputer {
    type Output = DiagnosticIgnoranceData;

    fn compute(&self, cx: &DocumentContext) -> Result<DiagnosticIgnoranceData> {
        let syntax = cx.syntax()?;

        let code_lines: FxHashSet<usize> = syntax
            .tokens_from_default_channel()
            .map(|t| t.span.end.line)
            .collect();
        let last_line = syntax.line_index().line_count().saturating_sub(1);

        let mut data = DiagnosticIgnoranceData::default();
        let mut open: FxHashMap<Option<SmolStr>, usize> = FxHashMap::default();

        for comment in syntax.comments() {
            let Some(marker) = Marker::parse(&comment.text) else {
                continue;
            };
            let line = comment.span.start.line;

            if code_lines.contains(&line) {
                if marker.off {
                    data.add(marker.code, line..=line);
                }
                continue;
            }

            if marker.off {
                open.entry(marker.code).or_insert(line);
            } else if let Some(start) = open.remove(&marker.code) {
                data.add(marker.code, start..=line);
            }
        }

        for (code, start) in open {
            data.add(code, start..=last_line);
        }

        Ok(data)
    }
}

/// A parsed `// BSLLS[:Code]-off|on` comment
#[derive(Debug, PartialEq, Eq)]
struct Marker {
    /// Lowercased rule code, `None` for every rule
    code: Option<SmolStr>,
    off: bool,
}

impl Marker {
    fn parse(comment: &str) -> Option<Self> {
        let body = comment.strip_prefix("//")?.trim().to_lowercase();
        let rest = body.strip_prefix("bslls")?;

        let (code, switch) = match rest.strip_prefix(':') {
            Some(rest) => {
                let (code, switch) = rest.rsplit_once('-')?;
                if code.is_empty() || !code.chars().all(|c| c.is_alphanumeric() || c == '_') {
                    return None;
                }
                (Some(SmolStr::new(code)), switch)
            }
            None => (None, rest.strip_prefix('-')?),
        };

        let off = match switch {
            "off" => true,
            "on" => false,
            _ => return None,
        };
        Some(Self { code, off })
    }
}
