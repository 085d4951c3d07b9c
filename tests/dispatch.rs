//! End-to-end behaviour of a configured registry: delivery order, the
//! policies, the unknown-group broadcast, the no-op registry and concurrent
//! dispatch from several threads.

use std::{
    fmt,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    thread,
};

use reportmux::{
    ConfigErrorKind, DeliveryError, ErrorLogger, Group, GroupOptions, Mux, Reporter, Trace,
    reporter, reporters::writer::WriterReporter, trace,
};

#[derive(Clone, Debug, PartialEq, Eq)]
struct Delivery {
    reporter: &'static str,
    trace: String,
    topic: String,
    body: String,
}

#[derive(Clone, Default)]
struct Journal(Arc<Mutex<Vec<Delivery>>>);

impl Journal {
    fn reporter(&self, name: &'static str, succeed: bool) -> impl Reporter + use<> {
        let journal = self.clone();
        reporter::from_fn(move |trace, topic, body| {
            journal.0.lock().unwrap().push(Delivery {
                reporter: name,
                trace: trace.to_string(),
                topic: topic.to_string(),
                body: body.to_string(),
            });
            if succeed {
                Ok(())
            } else {
                Err(DeliveryError::from(format!("{name} is down")))
            }
        })
    }

    fn names(&self) -> Vec<&'static str> {
        self.0.lock().unwrap().iter().map(|d| d.reporter).collect()
    }

    fn deliveries(&self) -> Vec<Delivery> {
        self.0.lock().unwrap().clone()
    }
}

#[derive(Clone, Default)]
struct Log(Arc<Mutex<Vec<String>>>);

impl ErrorLogger for Log {
    fn log_error(&self, error: &(dyn std::error::Error + 'static), context: fmt::Arguments<'_>) {
        self.0.lock().unwrap().push(format!("{context}: {error}"));
    }
}

#[test]
fn first_success_only_invokes_the_first_reporter() {
    let journal = Journal::default();
    let mut mux = Mux::new();
    mux.new_group("g", GroupOptions::new())
        .add("g", journal.reporter("A", true))
        .add("g", journal.reporter("B", true));
    mux.validate().unwrap();

    mux.report("g", &trace!("x"), "t", "b");
    assert_eq!(journal.names(), ["A"]);
}

#[test]
fn failed_reporter_falls_back_in_order() {
    let journal = Journal::default();
    let log = Log::default();
    let mut mux = Mux::new().with_logger(log.clone());
    mux.new_group("g", GroupOptions::new())
        .add("g", journal.reporter("A", false))
        .add("g", journal.reporter("B", true));
    mux.validate().unwrap();

    mux.report("g", &trace!("x"), "t", "b");
    assert_eq!(journal.names(), ["A", "B"]);
    assert_eq!(
        *log.0.lock().unwrap(),
        ["reporting to group 'g' via reporter no. 0 failed: A is down"]
    );
}

#[test]
fn try_all_invokes_every_reporter() {
    let journal = Journal::default();
    let mut mux = Mux::new();
    mux.new_group("g", GroupOptions::new().try_all())
        .add("g", journal.reporter("A", true))
        .add("g", journal.reporter("B", true));
    mux.validate().unwrap();

    mux.report("g", &trace!("x"), "t", "b");
    assert_eq!(journal.names(), ["A", "B"]);
}

#[test]
fn unknown_group_reaches_everyone_exactly_once_without_payload() {
    let journal = Journal::default();
    let mut mux = Mux::new();
    mux.add_groups([
        Group::new("mail")
            .reporter(journal.reporter("mail-a", true))
            .reporter(journal.reporter("mail-b", true)),
        Group::new("chat")
            .try_all()
            .reporter(journal.reporter("chat", false)),
        Group::new("console").reporter(journal.reporter("console", true)),
    ]);
    mux.validate().unwrap();

    let original = trace!("service", "handler");
    mux.report("mial", &original, "db password leaked", "hunter2");

    let deliveries = journal.deliveries();
    assert_eq!(
        deliveries.iter().map(|d| d.reporter).collect::<Vec<_>>(),
        ["mail-a", "mail-b", "chat", "console"]
    );
    for delivery in &deliveries {
        assert_eq!(delivery.trace, Mux::misuse_trace().to_string());
        assert_ne!(delivery.topic, "db password leaked");
        assert!(delivery.topic.contains("'mial'"));
        assert!(!delivery.body.contains("hunter2"));
        assert!(!delivery.body.contains("db password leaked"));
        assert!(delivery.body.contains(&original.to_string()));
        assert!(delivery.body.contains(file!()));
    }
}

#[test]
fn nop_registry_never_delivers_or_logs() {
    let journal = Journal::default();
    let log = Log::default();
    let mut mux = Mux::nop().with_logger(log.clone());
    mux.new_group("g", GroupOptions::new())
        .add("g", journal.reporter("A", false));
    mux.validate().unwrap();

    mux.report("g", &trace!(), "t", "b");
    mux.report("missing", &trace!(), "t", "b");
    assert!(journal.deliveries().is_empty());
    assert!(log.0.lock().unwrap().is_empty());
}

#[test]
fn configuration_errors_surface_once_through_validate() {
    let mut mux = Mux::new();
    mux.new_group("ops", GroupOptions::new())
        .add("opz", reporter::from_fn(|_, _, _| Ok(())))
        .new_group("ops", GroupOptions::new());

    let error = mux.validate().unwrap_err();
    assert_eq!(
        error.kind(),
        &ConfigErrorKind::UnknownGroup { name: "opz".into() }
    );
    assert_eq!(error.to_string(), "group 'opz' doesn't exist");
    assert_eq!(mux.validate().unwrap_err(), error);
}

#[test]
fn concurrent_dispatch_from_shared_registry() {
    const THREADS: usize = 8;
    const REPORTS: usize = 50;

    let delivered = Arc::new(AtomicUsize::new(0));
    let counter = {
        let delivered = delivered.clone();
        reporter::from_fn(move |_, _, _| {
            delivered.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    };

    let mut mux = Mux::new();
    mux.new_group("g", GroupOptions::new().try_all())
        .add("g", counter)
        .add("g", reporter::from_fn(|_, _, _| Err("flaky".into())));
    mux.validate().unwrap();
    let mux = Arc::new(mux);

    let base = trace!("workers");
    thread::scope(|scope| {
        for worker in 0..THREADS {
            let mux = &mux;
            let trace = base.add([format!("worker-{worker}")]);
            scope.spawn(move || {
                for _ in 0..REPORTS {
                    mux.report("g", &trace, "tick", "");
                }
            });
        }
    });

    assert_eq!(delivered.load(Ordering::SeqCst), THREADS * REPORTS);
    assert_eq!(base.to_string(), "/workers");
}

#[test]
fn writer_reporter_as_last_resort_channel() {
    let console = Arc::new(WriterReporter::new(String::new()));
    let mut mux = Mux::new();
    mux.new_group("ops", GroupOptions::new())
        .add("ops", reporter::from_fn(|_, _, _| Err("smtp timeout".into())))
        .add("ops", console.clone());
    mux.validate().unwrap();

    mux.report("ops", &Trace::new(["cron", "backup"]), "backup failed", "disk full");
    assert_eq!(
        console.with_writer(|out| out.clone()).unwrap(),
        "/cron/backup: backup failed\ndisk full\n\n"
    );
}
