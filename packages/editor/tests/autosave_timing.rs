//! Debounce timing against tokio's paused clock

use coursekit_editor::{
    Ack, AutoSaveScheduler, Course, CourseSession, EditorConfig, MemorySink, Mutation,
    PersistError, PersistenceSink, RecordingNotifier, SaveState,
};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::thread::{self, ThreadId};
use std::time::Duration;
use tokio::time::{sleep, Instant};

const DEBOUNCE: Duration = Duration::from_millis(1000);

/// Remembers which thread each write ran on
#[derive(Default)]
struct ThreadRecordingSink {
    inner: MemorySink,
    threads: Mutex<Vec<ThreadId>>,
}

impl PersistenceSink for ThreadRecordingSink {
    fn persist(&self, course: &Course) -> Result<Ack, PersistError> {
        self.threads.lock().unwrap().push(thread::current().id());
        self.inner.persist(course)
    }
}

#[tokio::test(start_paused = true)]
async fn test_edits_within_window_coalesce() {
    let sink = Arc::new(MemorySink::new());
    let mut autosave = AutoSaveScheduler::new(sink.clone(), DEBOUNCE);
    let start = Instant::now();

    autosave.mark_changed(&Course::new("c1", "t=0"));
    sleep(Duration::from_millis(500)).await;
    autosave.mark_changed(&Course::new("c1", "t=500"));

    // The first timer would have fired at t=1000
    sleep(Duration::from_millis(999)).await;
    assert_eq!(sink.persist_count(), 0);
    assert_eq!(autosave.state(), SaveState::Saving);

    sleep(Duration::from_millis(2)).await;
    assert_eq!(sink.persist_count(), 1);
    assert_eq!(sink.last().unwrap().title, "t=500");
    assert_eq!(autosave.state(), SaveState::Saved);
    assert!(start.elapsed() >= Duration::from_millis(1500));

    // Nothing else fires later
    sleep(Duration::from_secs(5)).await;
    assert_eq!(sink.persist_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_save_now_cancels_pending_timer() {
    let sink = Arc::new(MemorySink::new());
    let mut autosave = AutoSaveScheduler::new(sink.clone(), DEBOUNCE);

    autosave.mark_changed(&Course::new("c1", "draft"));
    sleep(Duration::from_millis(200)).await;
    autosave.save_now(&Course::new("c1", "manual")).unwrap();

    sleep(Duration::from_secs(3)).await;
    assert_eq!(sink.persist_count(), 1);
    assert_eq!(sink.last().unwrap().title, "manual");
}

#[tokio::test(start_paused = true)]
async fn test_persist_failure_retried_by_next_edit() {
    let sink = Arc::new(MemorySink::new());
    let mut autosave = AutoSaveScheduler::new(sink.clone(), DEBOUNCE);
    sink.reject_next("offline");

    autosave.mark_changed(&Course::new("c1", "first"));
    sleep(Duration::from_millis(1100)).await;
    assert_eq!(autosave.state(), SaveState::Saving);
    assert!(autosave.last_error().is_some());

    autosave.mark_changed(&Course::new("c1", "second"));
    sleep(Duration::from_millis(1100)).await;
    assert_eq!(autosave.state(), SaveState::Saved);
    assert_eq!(sink.last().unwrap().title, "second");
}

#[tokio::test(start_paused = true)]
async fn test_session_edits_autosave_once() {
    let sink = Arc::new(MemorySink::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let config = EditorConfig {
        autosave_debounce_ms: 300,
        ..EditorConfig::default()
    };
    let mut session = CourseSession::new(
        Course::new("c1", "Rust"),
        config,
        sink.clone(),
        notifier,
    );

    let m = session.apply(Mutation::AddModule).unwrap().unwrap();
    sleep(Duration::from_millis(100)).await;
    session
        .apply(Mutation::UpdateModuleField {
            module_id: m.clone(),
            field: "title".to_string(),
            value: json!("Ownership"),
        })
        .unwrap();
    sleep(Duration::from_millis(100)).await;
    session.apply(Mutation::AddUnit { module_id: m }).unwrap();

    sleep(Duration::from_millis(301)).await;
    assert_eq!(sink.persist_count(), 1);
    assert_eq!(sink.last().as_ref(), Some(session.course()));
    assert_eq!(session.save_state(), SaveState::Saved);
}

#[tokio::test(start_paused = true)]
async fn test_debounced_write_runs_off_the_runtime_thread() {
    let sink = Arc::new(ThreadRecordingSink::default());
    let mut autosave = AutoSaveScheduler::new(sink.clone(), DEBOUNCE);

    autosave.mark_changed(&Course::new("c1", "draft"));
    sleep(Duration::from_millis(1001)).await;
    autosave.save_now(&Course::new("c1", "manual")).unwrap();

    // Timer flush on the blocking pool, manual save on the caller
    let threads = sink.threads.lock().unwrap().clone();
    assert_eq!(threads.len(), 2);
    assert_ne!(threads[0], thread::current().id());
    assert_eq!(threads[1], thread::current().id());
    assert_eq!(sink.inner.last().unwrap().title, "manual");
    assert_eq!(autosave.state(), SaveState::Saved);
}
