//! Views shared by many readers while the document is being rebuilt.

use std::sync::mpsc;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use bsl::diagnostics::{
    CodeOutOfRegion, DiagnosticInfo, DiagnosticRule, DiagnosticSink, RegisteredRule,
};
use bsl::{
    AnalysisOptions, DiagnosticComputer, DocumentContext, DocumentUri, Language, ServerContext,
};
use parking_lot::{Condvar, Mutex};

use crate::helpers::context_helpers::{BSL_URI, shared_document};
use crate::helpers::source_fixtures::{BRANCHY_METHOD, MODULE_IN_REGIONS};

const THREADS: usize = 8;

#[test]
fn test_concurrent_readers_share_one_computation() {
    let cx = shared_document(MODULE_IN_REGIONS);
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let cx = Arc::clone(&cx);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                (cx.metrics().unwrap(), cx.diagnostics().unwrap())
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let (metrics, diagnostics) = &results[0];
    for (other_metrics, other_diagnostics) in &results[1..] {
        assert!(Arc::ptr_eq(metrics, other_metrics));
        assert!(Arc::ptr_eq(diagnostics, other_diagnostics));
    }
    assert!(diagnostics.is_empty());
}

#[test]
fn test_readers_see_old_or_new_content_during_rebuild() {
    let old = "А = 1;";
    let cx = shared_document(old);
    let barrier = Arc::new(Barrier::new(THREADS + 1));

    let readers: Vec<_> = (0..THREADS)
        .map(|_| {
            let cx = Arc::clone(&cx);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..50 {
                    let content = cx.content().unwrap();
                    assert!(&*content == old || &*content == BRANCHY_METHOD);
                    let lines = cx.content_list().unwrap();
                    assert!(lines.len() == 1 || lines.len() == BRANCHY_METHOD.lines().count());
                    let metrics = cx.metrics().unwrap();
                    assert!(metrics.functions <= 1);
                }
            })
        })
        .collect();

    barrier.wait();
    cx.rebuild(BRANCHY_METHOD);

    for reader in readers {
        reader.join().unwrap();
    }

    assert_eq!(&*cx.content().unwrap(), BRANCHY_METHOD);
    assert_eq!(cx.metrics().unwrap().functions, 1);
    assert_eq!(cx.symbol_tree().unwrap().methods()[0].name, "Оценка");
}

#[test]
fn test_clear_and_diagnostics_do_not_deadlock() {
    let cx = shared_document(MODULE_IN_REGIONS);
    let barrier = Arc::new(Barrier::new(2));

    let diagnostics = {
        let cx = Arc::clone(&cx);
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            for _ in 0..20 {
                let _ = cx.diagnostics();
                let _ = cx.metrics();
            }
        })
    };

    barrier.wait();
    for _ in 0..20 {
        cx.clear_secondary_data();
        cx.rebuild(MODULE_IN_REGIONS);
    }
    diagnostics.join().unwrap();

    assert!(cx.diagnostics().unwrap().is_empty());
}

/// Progress of the one gated diagnostics run
struct Gate {
    entered: bool,
    released: bool,
}

static GATE: Mutex<Gate> = Mutex::new(Gate {
    entered: false,
    released: false,
});
static GATE_CHANGED: Condvar = Condvar::new();
const TIMEOUT: Duration = Duration::from_secs(5);

const GATED: DiagnosticInfo = DiagnosticInfo {
    code: "Gated",
    ..CodeOutOfRegion::INFO
};

/// Blocks inside `check` until the gate is released
struct GatedRule;

impl DiagnosticRule for GatedRule {
    fn info(&self) -> &'static DiagnosticInfo {
        &GATED
    }

    fn check(&mut self, _cx: &DocumentContext, _sink: &mut DiagnosticSink<'_>) -> bsl::Result<()> {
        let mut gate = GATE.lock();
        gate.entered = true;
        GATE_CHANGED.notify_all();
        while !gate.released {
            GATE_CHANGED.wait(&mut gate);
        }
        Ok(())
    }
}

fn gated() -> Box<dyn DiagnosticRule> {
    Box::new(GatedRule)
}

fn release_gate() {
    GATE.lock().released = true;
    GATE_CHANGED.notify_all();
}

#[test]
fn test_running_diagnostics_do_not_block_compute_views() {
    let rules = vec![RegisteredRule {
        info: &GATED,
        factory: gated,
    }];
    let computer = DiagnosticComputer::with_rules(rules, Language::English, |_| true);
    let server = ServerContext::with_diagnostic_computer(AnalysisOptions::default(), computer);
    let cx = Arc::new(DocumentContext::new(
        DocumentUri::from(BSL_URI),
        "Процедура А()\nКонецПроцедуры",
        Arc::new(server),
    ));

    let diagnostics = {
        let cx = Arc::clone(&cx);
        thread::spawn(move || cx.diagnostics().map(|d| d.len()))
    };

    {
        let mut gate = GATE.lock();
        while !gate.entered {
            if GATE_CHANGED.wait_for(&mut gate, TIMEOUT).timed_out() {
                drop(gate);
                release_gate();
                panic!("gated rule never started");
            }
        }
    }

    let (tx, rx) = mpsc::channel();
    let reader = {
        let cx = Arc::clone(&cx);
        thread::spawn(move || {
            let procedures = cx.metrics().map(|m| m.procedures);
            cx.rebuild("Функция Б()\nКонецФункции");
            let functions = cx.metrics().map(|m| m.functions);
            let _ = tx.send((procedures, functions));
        })
    };

    let outcome = rx.recv_timeout(TIMEOUT);
    release_gate();

    let (procedures, functions) = outcome.expect("compute views blocked by a running diagnostics run");
    assert_eq!(procedures.unwrap(), 1);
    assert_eq!(functions.unwrap(), 1);

    reader.join().unwrap();
    assert_eq!(diagnostics.join().unwrap().unwrap(), 0);
}
