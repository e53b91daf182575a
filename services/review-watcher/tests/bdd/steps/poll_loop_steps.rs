//! BDD step definitions for the poll loop

use std::sync::Arc;
use std::time::Duration;

use cucumber::{given, then, when};
use tokio_util::sync::CancellationToken;

use review_watcher::engine::{CycleOutcome, PollLoop};
use review_watcher::error::FetchError;

use crate::world::{QueuedSource, RecordingNotifier, WatcherWorld};

#[given(expr = "the status endpoint will report {string} as {string}")]
fn endpoint_reports(world: &mut WatcherWorld, name: String, status: String) {
    world.script.push(Ok(serde_json::json!({
        "homeworks": [{"homework_name": name, "status": status}]
    })));
}

#[given(expr = "the status endpoint will report {string} as {string} at server time {int}")]
fn endpoint_reports_at(world: &mut WatcherWorld, name: String, status: String, now: u64) {
    world.script.push(Ok(serde_json::json!({
        "homeworks": [{"homework_name": name, "status": status}],
        "current_date": now
    })));
}

#[given(expr = "the status endpoint will report no homework at server time {int}")]
fn endpoint_empty_at(world: &mut WatcherWorld, now: u64) {
    world
        .script
        .push(Ok(serde_json::json!({"homeworks": [], "current_date": now})));
}

#[given("the status endpoint will report no homework")]
fn endpoint_empty(world: &mut WatcherWorld) {
    world.script.push(Ok(serde_json::json!({"homeworks": []})));
}

#[given("the status endpoint will time out")]
fn endpoint_times_out(world: &mut WatcherWorld) {
    world.script.push(Err(FetchError::Unreachable(
        "operation timed out".to_string(),
    )));
}

#[given(expr = "the status endpoint will answer with HTTP {int}")]
fn endpoint_bad_status(world: &mut WatcherWorld, status: u16) {
    world.script.push(Err(FetchError::BadStatus(status)));
}

#[given("the notification channel is down")]
fn channel_down(world: &mut WatcherWorld) {
    world.failing_channel = true;
}

#[given(expr = "a poll loop starting at cursor {int}")]
fn poll_loop_at(world: &mut WatcherWorld, cursor: u64) {
    world.start_cursor = cursor;
}

#[when(expr = "{int} poll cycle(s) run(s)")]
async fn cycles_run(world: &mut WatcherWorld, count: usize) {
    if world.poll_loop.is_none() {
        let source = Arc::new(QueuedSource::new(std::mem::take(&mut world.script)));
        let recorder = Arc::new(RecordingNotifier::new(world.failing_channel));
        world.poll_loop = Some(PollLoop::new(
            source.clone(),
            recorder.clone(),
            Duration::from_secs(600),
            world.start_cursor,
            CancellationToken::new(),
        ));
        world.source = Some(source);
        world.recorder = Some(recorder);
    }

    let poll_loop = world.poll_loop.as_mut().expect("poll loop not built");
    for _ in 0..count {
        let outcome = poll_loop.run_cycle().await;
        world.outcomes.push(outcome);
    }
}

#[then(expr = "{int} notification(s) should have been sent")]
fn notifications_sent(world: &mut WatcherWorld, expected: usize) {
    let recorder = world.recorder.as_ref().expect("no recorder");
    assert_eq!(recorder.sent().len(), expected, "{:?}", recorder.sent());
}

#[then(expr = "notification {int} should start with {string}")]
fn notification_starts_with(world: &mut WatcherWorld, index: usize, prefix: String) {
    let sent = world.recorder.as_ref().expect("no recorder").sent();
    let message = sent.get(index - 1).expect("no such notification");
    assert!(message.starts_with(&prefix), "{message}");
}

#[then(expr = "the cursor should be {int}")]
fn cursor_is(world: &mut WatcherWorld, expected: u64) {
    let poll_loop = world.poll_loop.as_ref().expect("poll loop not built");
    assert_eq!(poll_loop.cursor(), expected);
}

#[then(expr = "every fetch should have used cursor {int}")]
fn fetches_used_cursor(world: &mut WatcherWorld, expected: u64) {
    let cursors = world.source.as_ref().expect("no source").cursors();
    assert!(!cursors.is_empty());
    assert!(cursors.iter().all(|c| *c == expected), "{cursors:?}");
}

#[then("every cycle should have been quiet")]
fn all_quiet(world: &mut WatcherWorld) {
    assert!(world.outcomes.iter().all(|o| *o == CycleOutcome::Quiet), "{:?}", world.outcomes);
}

#[then(expr = "cycle {int} should have failed")]
fn cycle_failed(world: &mut WatcherWorld, index: usize) {
    let outcome = world.outcomes.get(index - 1).expect("no such cycle");
    assert!(matches!(outcome, CycleOutcome::Failed { .. }), "{outcome:?}");
}

#[then("no error should be remembered")]
fn no_error_remembered(world: &mut WatcherWorld) {
    let poll_loop = world.poll_loop.as_ref().expect("poll loop not built");
    assert_eq!(poll_loop.state().last_error_message, None);
}

#[then(expr = "cycle {int} should have failed without notifying")]
fn cycle_failed_silently(world: &mut WatcherWorld, index: usize) {
    let outcome = world.outcomes.get(index - 1).expect("no such cycle");
    assert!(
        matches!(
            outcome,
            CycleOutcome::Failed {
                notified: false,
                ..
            }
        ),
        "{outcome:?}"
    );
}

#[then("the last error should be remembered")]
fn error_remembered(world: &mut WatcherWorld) {
    let poll_loop = world.poll_loop.as_ref().expect("poll loop not built");
    let last = poll_loop.state().last_error_message.as_deref();
    assert!(
        last.is_some_and(|m| m.starts_with("Program failure:")),
        "{last:?}"
    );
}
