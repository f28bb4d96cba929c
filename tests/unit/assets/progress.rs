use super::*;

#[test]
fn completed_never_decreases_within_a_run() {
    let store = ProgressStore::new();
    store.start("p1", 4);
    store.update("p1", &PrepareProgress::preparing(4, 2, "scene 2"));
    let merged = store.update("p1", &PrepareProgress::preparing(4, 1, "late report"));
    assert_eq!(merged.completed, 2);
    assert_eq!(merged.current_task, "late report");

    let restarted = store.start("p1", 3);
    assert_eq!(restarted.completed, 0);
    assert_eq!(store.get("p1").unwrap().total, 3);
}

#[test]
fn records_are_keyed_by_project() {
    let store = ProgressStore::new();
    store.start("a", 1);
    store.start("b", 2);
    assert_eq!(store.len(), 2);
    assert_eq!(store.clear("a").unwrap().total, 1);
    assert!(store.get("a").is_none());
    assert_eq!(store.get("b").unwrap().total, 2);
}

#[test]
fn sink_restarts_after_a_finished_run() {
    let store = ProgressStore::new();
    let sink = store.sink("p");
    sink.report(&PrepareProgress::preparing(2, 0, "start"));
    sink.report(&PrepareProgress::preparing(2, 2, "done"));
    sink.report(&PrepareProgress::ready(2, 2));
    assert!(store.get("p").unwrap().is_finished());

    sink.report(&PrepareProgress::preparing(5, 0, "again"));
    let p = store.get("p").unwrap();
    assert_eq!((p.total, p.completed, p.status), (5, 0, PrepareStatus::Preparing));
}

#[test]
fn single_report_runs_replace_a_finished_record() {
    let store = ProgressStore::new();
    let sink = store.sink("p");
    sink.report(&PrepareProgress::preparing(3, 0, "start"));
    sink.report(&PrepareProgress::ready(3, 3));

    sink.report(&PrepareProgress::ready(0, 0));
    let p = store.get("p").unwrap();
    assert_eq!((p.total, p.completed, p.status), (0, 0, PrepareStatus::Ready));

    sink.report(&PrepareProgress::failed(0, 0, "duplicate scene id 'a'"));
    let p = store.get("p").unwrap();
    assert_eq!((p.total, p.completed, p.status), (0, 0, PrepareStatus::Error));
}

#[test]
fn mid_run_reports_do_not_restart() {
    let store = ProgressStore::new();
    let sink = store.sink("p");
    sink.report(&PrepareProgress::preparing(2, 0, "start"));
    sink.report(&PrepareProgress::preparing(2, 1, "one done"));
    sink.report(&PrepareProgress::failed(2, 0, "cancelled"));
    let p = store.get("p").unwrap();
    assert_eq!((p.total, p.completed, p.status), (2, 1, PrepareStatus::Error));
}

#[test]
fn closures_are_sinks() {
    let seen = Mutex::new(Vec::new());
    let sink = |p: &PrepareProgress| seen.lock().unwrap().push(p.completed);
    sink.report(&PrepareProgress::preparing(2, 1, "x"));
    sink.report(&PrepareProgress::ready(2, 2));
    assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
}

#[tokio::test(start_paused = true)]
async fn clear_after_expires_only_the_finished_run() {
    let store = ProgressStore::new();
    store.start("p", 1);
    store.update("p", &PrepareProgress::ready(1, 1));
    store.clear_after("p", Duration::from_millis(500)).await.unwrap();
    assert!(store.get("p").is_none());

    store.start("q", 1);
    let pending = store.clear_after("q", Duration::from_millis(500));
    store.start("q", 7);
    pending.await.unwrap();
    assert_eq!(store.get("q").unwrap().total, 7);
}
