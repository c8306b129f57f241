//! Integration tests for the breathing session engine.
//!
//! These drive a `SessionController` through whole-session scenarios with
//! a recording sink, using tokio's paused clock so hours of reminder
//! escalation run instantly.

use std::time::Duration;

use tokio::time::{advance, Instant};

use breathe::session::{AUTO_PAUSE_ESCALATION, OVERLAY_ESCALATION, REMINDER_PHRASE};
use breathe::{
    MockNotificationSink, Phase, SessionConfig, SessionController, SinkEvent,
};

const TICK: Duration = Duration::from_millis(50);

fn controller_with(config: SessionConfig) -> SessionController<MockNotificationSink> {
    SessionController::new(config, MockNotificationSink::new()).expect("valid config")
}

/// Advances simulated time tick by tick, calling the controller each step.
async fn drive(controller: &mut SessionController<MockNotificationSink>, span: Duration) {
    let mut remaining = span;
    while remaining > Duration::ZERO {
        let step = remaining.min(TICK);
        advance(step).await;
        controller.tick(Instant::now());
        remaining -= step;
    }
}

fn phases_of(events: &[SinkEvent]) -> Vec<Phase> {
    events
        .iter()
        .filter_map(|event| match event {
            SinkEvent::Phase { phase, .. } => Some(*phase),
            _ => None,
        })
        .collect()
}

fn cues_of(events: &[SinkEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match event {
            SinkEvent::Cue { phrase } => Some(phrase.clone()),
            _ => None,
        })
        .collect()
}

// ============================================================================
// End-to-End Session Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_short_session_end_to_end() {
    // One full 4/7/8 cycle, then the session is over.
    let config = SessionConfig::default().with_total(Duration::from_secs(19));
    let mut controller = controller_with(config);

    controller.start(Instant::now());
    controller.tick(Instant::now());
    drive(&mut controller, Duration::from_secs(19)).await;

    let events = controller.sink().recorded();
    assert_eq!(
        phases_of(&events),
        vec![Phase::Inhale, Phase::Hold, Phase::Exhale, Phase::Complete]
    );
    assert_eq!(
        cues_of(&events),
        vec![
            "Breathe in slowly",
            "Hold your breath",
            "Exhale slowly",
            "Session complete. Well done."
        ]
    );
    assert!(controller.is_complete());

    // Audio started on start and stopped on completion.
    assert_eq!(events.first(), Some(&SinkEvent::Audio { playing: true }));
    assert!(events.contains(&SinkEvent::Audio { playing: false }));

    // Progress reached exactly 1.0.
    assert!(events.contains(&SinkEvent::Progress { fraction: 1.0 }));
}

#[tokio::test(start_paused = true)]
async fn test_two_cycles_repeat_the_phase_sequence() {
    let config = SessionConfig::default().with_total(Duration::from_secs(38));
    let mut controller = controller_with(config);

    controller.start(Instant::now());
    controller.tick(Instant::now());
    drive(&mut controller, Duration::from_secs(38)).await;

    assert_eq!(
        phases_of(&controller.sink().recorded()),
        vec![
            Phase::Inhale,
            Phase::Hold,
            Phase::Exhale,
            Phase::Inhale,
            Phase::Hold,
            Phase::Exhale,
            Phase::Complete
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_progress_is_monotonic_while_running() {
    let config = SessionConfig::default().with_total(Duration::from_secs(19));
    let mut controller = controller_with(config);

    controller.start(Instant::now());
    controller.tick(Instant::now());
    drive(&mut controller, Duration::from_secs(19)).await;

    let fractions: Vec<f64> = controller
        .sink()
        .recorded()
        .iter()
        .filter_map(|event| match event {
            SinkEvent::Progress { fraction } => Some(*fraction),
            _ => None,
        })
        .collect();

    assert!(!fractions.is_empty());
    assert!(fractions.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(fractions.last(), Some(&1.0));
}

// ============================================================================
// Pause / Resume Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_pause_freezes_elapsed_across_a_long_gap() {
    let mut controller = controller_with(SessionConfig::default());

    controller.start(Instant::now());
    controller.tick(Instant::now());
    drive(&mut controller, Duration::from_secs(10)).await;

    controller.pause(Instant::now());
    assert_eq!(controller.phase(), Phase::Paused);

    // A long wall-clock gap while paused adds nothing to elapsed.
    advance(Duration::from_secs(600)).await;
    controller.tick(Instant::now());
    assert_eq!(controller.elapsed(Instant::now()), Duration::from_secs(10));

    controller.start(Instant::now());
    drive(&mut controller, Duration::from_secs(2)).await;
    assert_eq!(controller.elapsed(Instant::now()), Duration::from_secs(12));
}

#[tokio::test(start_paused = true)]
async fn test_resume_reenters_the_interrupted_phase() {
    let mut controller = controller_with(SessionConfig::default());

    controller.start(Instant::now());
    controller.tick(Instant::now());
    // Into the hold window (4s..11s)
    drive(&mut controller, Duration::from_secs(6)).await;
    controller.pause(Instant::now());

    advance(Duration::from_secs(120)).await;
    controller.sink().clear();
    controller.start(Instant::now());
    controller.tick(Instant::now());

    // Still inside hold; elapsed resumed at 6s.
    assert_eq!(controller.phase(), Phase::Hold);
}

#[tokio::test(start_paused = true)]
async fn test_ticks_while_paused_emit_nothing() {
    let mut controller = controller_with(SessionConfig::default());

    controller.start(Instant::now());
    controller.tick(Instant::now());
    drive(&mut controller, Duration::from_secs(5)).await;
    controller.pause(Instant::now());
    controller.sink().clear();

    drive(&mut controller, Duration::from_secs(60)).await;

    assert!(controller.sink().recorded().is_empty());
}

// ============================================================================
// Reminder Escalation Tests
// ============================================================================

const REMINDER_INTERVAL: Duration = Duration::from_secs(30 * 60);

fn long_session() -> SessionController<MockNotificationSink> {
    controller_with(
        SessionConfig::default()
            .with_total(Duration::from_secs(3 * 60 * 60))
            .with_reminder_interval(REMINDER_INTERVAL),
    )
}

#[tokio::test(start_paused = true)]
async fn test_reminder_escalates_to_overlay_then_auto_pause() {
    let mut controller = long_session();
    controller.start(Instant::now());
    controller.tick(Instant::now());

    drive(&mut controller, REMINDER_INTERVAL).await;
    let events = controller.sink().recorded();
    assert!(events.contains(&SinkEvent::ReminderPulse));
    assert!(cues_of(&events).contains(&REMINDER_PHRASE.to_string()));
    assert!(!events.contains(&SinkEvent::ReminderOverlay));
    controller.sink().clear();

    drive(&mut controller, OVERLAY_ESCALATION).await;
    assert!(controller
        .sink()
        .recorded()
        .contains(&SinkEvent::ReminderOverlay));
    assert!(controller.is_running());
    controller.sink().clear();

    drive(&mut controller, AUTO_PAUSE_ESCALATION - OVERLAY_ESCALATION).await;
    assert_eq!(controller.phase(), Phase::Paused);
    assert!(controller
        .sink()
        .recorded()
        .contains(&SinkEvent::Audio { playing: false }));
}

#[tokio::test(start_paused = true)]
async fn test_acknowledge_respaces_the_next_reminder() {
    let mut controller = long_session();
    controller.start(Instant::now());
    controller.tick(Instant::now());

    drive(&mut controller, REMINDER_INTERVAL).await;

    // User notices two minutes after the fire.
    drive(&mut controller, Duration::from_secs(120)).await;
    controller.acknowledge_reminder(Instant::now());
    let ack_time = Instant::now();
    controller.sink().clear();

    // The cancelled escalations never land.
    drive(&mut controller, AUTO_PAUSE_ESCALATION).await;
    let events = controller.sink().recorded();
    assert!(!events.contains(&SinkEvent::ReminderOverlay));
    assert!(controller.is_running());
    controller.sink().clear();

    // The next fire is a full interval from the acknowledgment.
    let already_elapsed = Instant::now() - ack_time;
    drive(&mut controller, REMINDER_INTERVAL - already_elapsed).await;
    assert!(controller
        .sink()
        .recorded()
        .contains(&SinkEvent::ReminderPulse));
}

#[tokio::test(start_paused = true)]
async fn test_reset_mid_escalation_kills_all_deadlines() {
    let mut controller = long_session();
    controller.start(Instant::now());
    controller.tick(Instant::now());

    // Fire, then escalate to overlay.
    drive(&mut controller, REMINDER_INTERVAL + OVERLAY_ESCALATION).await;
    assert!(controller
        .sink()
        .recorded()
        .contains(&SinkEvent::ReminderOverlay));

    controller.reset(Instant::now());
    let events = controller.sink().recorded();
    assert!(events.contains(&SinkEvent::OverlayHidden));
    controller.sink().clear();

    // Well past the old auto-pause deadline, nothing happens.
    drive(&mut controller, AUTO_PAUSE_ESCALATION).await;
    assert!(controller.sink().recorded().is_empty());
    assert_eq!(controller.phase(), Phase::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_hidden_fire_is_suppressed_and_deferred() {
    let mut controller = long_session();
    controller.start(Instant::now());
    controller.tick(Instant::now());
    controller.set_visible(false);

    drive(&mut controller, REMINDER_INTERVAL).await;
    assert!(!controller
        .sink()
        .recorded()
        .contains(&SinkEvent::ReminderPulse));

    // Returning to visibility does not fire immediately; the deferred
    // deadline is a full interval from the suppressed fire.
    controller.set_visible(true);
    controller.tick(Instant::now());
    assert!(!controller
        .sink()
        .recorded()
        .contains(&SinkEvent::ReminderPulse));

    drive(&mut controller, REMINDER_INTERVAL).await;
    assert!(controller
        .sink()
        .recorded()
        .contains(&SinkEvent::ReminderPulse));
}

#[tokio::test(start_paused = true)]
async fn test_escalation_proceeds_while_hidden() {
    let mut controller = long_session();
    controller.start(Instant::now());
    controller.tick(Instant::now());

    // Fire while visible, then hide.
    drive(&mut controller, REMINDER_INTERVAL).await;
    assert!(controller
        .sink()
        .recorded()
        .contains(&SinkEvent::ReminderPulse));
    controller.set_visible(false);
    controller.sink().clear();

    // Escalations are unaffected by visibility once armed.
    drive(&mut controller, OVERLAY_ESCALATION).await;
    assert!(controller
        .sink()
        .recorded()
        .contains(&SinkEvent::ReminderOverlay));
}

#[tokio::test(start_paused = true)]
async fn test_pause_then_resume_restarts_the_reminder_clock() {
    let mut controller = long_session();
    controller.start(Instant::now());
    controller.tick(Instant::now());

    // Almost at the fire deadline, then pause.
    drive(&mut controller, REMINDER_INTERVAL - Duration::from_secs(60)).await;
    controller.pause(Instant::now());
    controller.sink().clear();

    advance(Duration::from_secs(300)).await;
    controller.start(Instant::now());
    controller.sink().clear();

    // The old deadline is dead; the fresh one is a full interval out.
    drive(&mut controller, Duration::from_secs(120)).await;
    assert!(!controller
        .sink()
        .recorded()
        .contains(&SinkEvent::ReminderPulse));

    drive(&mut controller, REMINDER_INTERVAL - Duration::from_secs(120)).await;
    assert!(controller
        .sink()
        .recorded()
        .contains(&SinkEvent::ReminderPulse));
}

// ============================================================================
// Completion and Restart Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_completed_session_ignores_start_until_reset() {
    let config = SessionConfig::default().with_total(Duration::from_secs(19));
    let mut controller = controller_with(config);

    controller.start(Instant::now());
    controller.tick(Instant::now());
    drive(&mut controller, Duration::from_secs(19)).await;
    assert!(controller.is_complete());
    controller.sink().clear();

    // Start from Complete is a no-op.
    controller.start(Instant::now());
    assert!(controller.sink().recorded().is_empty());
    assert!(controller.is_complete());

    // Reset back to idle, then a fresh start works.
    controller.reset(Instant::now());
    controller.start(Instant::now());
    controller.tick(Instant::now());
    assert_eq!(controller.phase(), Phase::Inhale);
    assert_eq!(controller.elapsed(Instant::now()), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_completion_cancels_a_pending_reminder() {
    // Interval longer than the session: the reminder must never fire.
    let config = SessionConfig::default()
        .with_total(Duration::from_secs(19))
        .with_reminder_interval(Duration::from_secs(60));
    let mut controller = controller_with(config);

    controller.start(Instant::now());
    controller.tick(Instant::now());
    drive(&mut controller, Duration::from_secs(19)).await;
    assert!(controller.is_complete());
    controller.sink().clear();

    drive(&mut controller, Duration::from_secs(300)).await;
    assert!(controller.sink().recorded().is_empty());
}
