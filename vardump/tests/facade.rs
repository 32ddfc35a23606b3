//! Tests for the process-wide dumper and the `dump!`/`dd!` macros.
//!
//! The default dumper is global, so every test holds `GLOBAL` while it
//! reconfigures the sink and restores defaults afterwards.

use std::collections::BTreeMap;
use std::sync::mpsc;
use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use vardump::test_support::{Account, RecordingExit, SharedSink};
use vardump::{Dump, DumpConfig, Shape, Terminate, configure, dd, dump, reset};

static GLOBAL: Mutex<()> = Mutex::new(());

fn capture() -> SharedSink {
    let sink = SharedSink::default();
    let handle = sink.clone();
    configure(move |dumper| {
        dumper.set_sink(Box::new(handle));
    });
    sink
}

#[test]
fn dump_macro_prints_indexed_values() {
    let _guard = GLOBAL.lock().unwrap_or_else(PoisonError::into_inner);
    let sink = capture();

    dump!(1, true, "text");

    assert_eq!(
        sink.contents(),
        "1 i32\n  1\n2 bool\n  true\n3 &str\n  \"text\"\n"
    );
    reset();
}

#[test]
fn struct_dump_shows_private_field() {
    let _guard = GLOBAL.lock().unwrap_or_else(PoisonError::into_inner);
    let sink = capture();

    dump!(Account::new("P", "p"));

    let out = sink.contents();
    assert!(out.contains("owner : (String) \"P\""), "{out}");
    assert!(out.contains("secret : (String) \"p\""), "{out}");
    reset();
}

#[test]
fn map_collapses_at_depth_zero() {
    let _guard = GLOBAL.lock().unwrap_or_else(PoisonError::into_inner);
    let sink = capture();
    configure(|dumper| {
        dumper
            .set_config(DumpConfig {
                indent: "  ".to_string(),
                max_depth: 0,
            })
            .expect("config");
    });

    let mut map = BTreeMap::new();
    map.insert(1, 1);
    dump!(map);

    assert_eq!(sink.contents(), "1 BTreeMap<i32, i32>\n  (len=1) {...}\n");
    reset();
}

#[test]
fn dd_macro_invokes_exit_hook_with_success() {
    let _guard = GLOBAL.lock().unwrap_or_else(PoisonError::into_inner);
    let sink = capture();
    let exit = RecordingExit::watching(sink.clone());
    let hook = exit.clone();
    configure(move |dumper| dumper.set_terminator(hook));

    dd!([2, 2]);

    assert_eq!(exit.codes(), vec![0]);
    assert_eq!(
        exit.output_at_exit(),
        vec!["1 [i32; 2]\n  (len=2, cap=2)[2, 2]\n".to_string()]
    );
    reset();
}

#[test]
fn separate_calls_produce_identical_output() {
    let _guard = GLOBAL.lock().unwrap_or_else(PoisonError::into_inner);
    let sink = capture();
    let value = vec![Some(1.5f64), None];

    dump!(value);
    let first = sink.contents();
    sink.clear();
    dump!(value);

    assert_eq!(first, sink.contents());
    assert_eq!(
        first,
        "1 Vec<Option<f64>>\n  (len=2, cap=2)[1.5, <nil>]\n"
    );
    reset();
}

/// Exit hook that restores the default dumper, as a test teardown would.
struct ResetOnExit {
    codes: mpsc::Sender<i32>,
}

impl Terminate for ResetOnExit {
    fn terminate(&self, code: i32) {
        reset();
        let _ = self.codes.send(code);
    }
}

#[test]
fn exit_hook_may_reset_the_dumper() {
    let _guard = GLOBAL.lock().unwrap_or_else(PoisonError::into_inner);
    let sink = capture();
    let (tx, rx) = mpsc::channel();
    configure(move |dumper| dumper.set_terminator(ResetOnExit { codes: tx }));

    let worker = thread::spawn(|| dd!(1));
    let code = rx
        .recv_timeout(Duration::from_secs(5))
        .expect("hook ran without deadlocking");
    worker.join().expect("worker");

    assert_eq!(code, 0);
    assert_eq!(sink.contents(), "1 i32\n  1\n");
    reset();
}

/// Dumps a marker from inside its own `shape`.
struct Chatty;

impl Dump for Chatty {
    fn shape(&self) -> Shape<'_> {
        dump!("inner");
        Shape::Bool(true)
    }
}

#[test]
fn shape_may_dump_while_being_dumped() {
    let _guard = GLOBAL.lock().unwrap_or_else(PoisonError::into_inner);
    let sink = capture();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        dump!(Chatty);
        let _ = tx.send(());
    });
    rx.recv_timeout(Duration::from_secs(5))
        .expect("nested dump finished");

    assert_eq!(sink.contents(), "1 &str\n  \"inner\"\n1 Chatty\n  true\n");
    reset();
}
