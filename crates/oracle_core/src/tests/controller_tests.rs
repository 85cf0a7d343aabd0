use super::*;
use crate::{error::ReasonFetchError, test_support::ScriptedRandomness};
use async_trait::async_trait;
use std::{
    collections::HashSet,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

type Timeline = Arc<Mutex<Vec<String>>>;

struct RecordingPacer {
    timeline: Timeline,
}

#[async_trait]
impl Pacer for RecordingPacer {
    async fn pause(&self, interval: Duration) {
        self.timeline
            .lock()
            .expect("timeline")
            .push(format!("pause {}ms", interval.as_millis()));
    }
}

struct CannedReasons {
    reply: Option<String>,
    calls: AtomicUsize,
    timeline: Timeline,
}

impl CannedReasons {
    fn ok(reason: &str, timeline: Timeline) -> Self {
        Self {
            reply: Some(reason.to_string()),
            calls: AtomicUsize::new(0),
            timeline,
        }
    }

    fn failing(timeline: Timeline) -> Self {
        Self {
            reply: None,
            calls: AtomicUsize::new(0),
            timeline,
        }
    }
}

#[async_trait]
impl ReasonSource for CannedReasons {
    async fn fetch_reason(&self) -> Result<String, ReasonFetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.timeline.lock().expect("timeline").push("fetch".into());
        match &self.reply {
            Some(reason) => Ok(reason.clone()),
            None => Err(ReasonFetchError::Status { status: 502 }),
        }
    }
}

fn catalog(statuses: &[&str]) -> Arc<PhraseCatalog> {
    Arc::new(
        PhraseCatalog::new(
            vec!["Ask Andy".into(), "Can I get a raise?".into()],
            statuses.iter().map(|s| s.to_string()).collect(),
        )
        .expect("catalog"),
    )
}

fn controller(
    statuses: &[&str],
    reasons: Arc<CannedReasons>,
    timeline: Timeline,
    randomness: Box<dyn Randomness>,
) -> InteractionController {
    InteractionController::new(catalog(statuses), reasons, CycleSettings::default())
        .with_pacer(Arc::new(RecordingPacer { timeline }))
        .with_randomness(randomness)
}

fn drain(rx: &mut broadcast::Receiver<ControllerEvent>) -> Vec<ControllerEvent> {
    let mut out = Vec::new();
    while let Ok(event) = rx.try_recv() {
        out.push(event);
    }
    out
}

#[tokio::test]
async fn two_step_cycle_waits_twice_then_fetches_once() {
    let timeline = Timeline::default();
    let reasons = Arc::new(CannedReasons::ok("Nope.", timeline.clone()));
    let randomness = ScriptedRandomness::new()
        .with_indices([0])
        .with_coins([true])
        .with_indices([0, 1]);
    let mut controller = controller(
        &["A", "B"],
        reasons.clone(),
        timeline.clone(),
        Box::new(randomness),
    );
    let mut events = controller.subscribe_events();

    controller.start().await.expect("start");

    assert_eq!(
        *timeline.lock().expect("timeline"),
        vec!["pause 5000ms", "pause 5000ms", "fetch"]
    );
    assert_eq!(reasons.calls.load(Ordering::SeqCst), 1);

    let shown: Vec<String> = drain(&mut events)
        .into_iter()
        .filter_map(|event| match event {
            ControllerEvent::Status { text, .. } => Some(text),
            _ => None,
        })
        .collect();
    assert_eq!(shown, vec!["A", "B"]);
}

#[tokio::test]
async fn service_reason_is_shown_verbatim() {
    let timeline = Timeline::default();
    let reasons = Arc::new(CannedReasons::ok("Your code has a typo.", timeline.clone()));
    let mut controller = controller(
        &["A", "B", "C"],
        reasons,
        timeline,
        Box::new(RngRandomness::seeded(7)),
    );

    let reason = controller.start().await.expect("start");

    assert_eq!(reason, "Your code has a typo.");
    assert_eq!(controller.state(), SessionState::Result);
    assert_eq!(
        controller.display(),
        DisplayedText::Reason("Your code has a typo.")
    );
}

#[tokio::test]
async fn failed_fetch_shows_the_fallback_exactly() {
    let timeline = Timeline::default();
    let reasons = Arc::new(CannedReasons::failing(timeline.clone()));
    let mut controller = controller(
        &["A", "B", "C"],
        reasons.clone(),
        timeline,
        Box::new(RngRandomness::seeded(3)),
    );

    let reason = controller.start().await.expect("start");

    assert_eq!(reason, "Because I said so. That's why.");
    assert_eq!(controller.reason(), Some("Because I said so. That's why."));
    assert_eq!(reasons.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn blank_service_reason_falls_back() {
    let timeline = Timeline::default();
    let reasons = Arc::new(CannedReasons::ok("  ", timeline.clone()));
    let mut controller = controller(
        &["A", "B"],
        reasons,
        timeline,
        Box::new(RngRandomness::seeded(11)),
    );

    let reason = controller.start().await.expect("start");
    assert_eq!(reason, DEFAULT_FALLBACK_REASON);
}

#[tokio::test]
async fn step_count_is_two_or_three_without_repeats() {
    let statuses = [
        "s0", "s1", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9",
    ];
    for seed in 0..40 {
        let timeline = Timeline::default();
        let reasons = Arc::new(CannedReasons::ok("No.", timeline.clone()));
        let mut controller = controller(
            &statuses,
            reasons,
            timeline.clone(),
            Box::new(RngRandomness::seeded(seed)),
        );
        let mut events = controller.subscribe_events();

        let reason = controller.start().await.expect("start");
        assert!(!reason.is_empty());

        let shown: Vec<String> = drain(&mut events)
            .into_iter()
            .filter_map(|event| match event {
                ControllerEvent::Status { text, .. } => Some(text),
                _ => None,
            })
            .collect();
        assert!(
            (MIN_STATUS_STEPS..=MAX_STATUS_STEPS).contains(&shown.len()),
            "seed {seed} showed {} statuses",
            shown.len()
        );
        let distinct: HashSet<&String> = shown.iter().collect();
        assert_eq!(distinct.len(), shown.len(), "seed {seed} repeated a status");

        let pauses = timeline
            .lock()
            .expect("timeline")
            .iter()
            .filter(|entry| entry.starts_with("pause"))
            .count();
        assert_eq!(pauses, shown.len());
    }
}

#[tokio::test]
async fn single_status_pool_repeats_once_exhausted() {
    let timeline = Timeline::default();
    let reasons = Arc::new(CannedReasons::ok("No.", timeline.clone()));
    let randomness = ScriptedRandomness::new().with_coins([false]);
    let mut controller = controller(&["Only"], reasons, timeline, Box::new(randomness));
    let mut events = controller.subscribe_events();

    controller.start().await.expect("start");

    let shown = drain(&mut events)
        .into_iter()
        .filter(|event| matches!(event, ControllerEvent::Status { .. }))
        .count();
    assert_eq!(shown, MAX_STATUS_STEPS);
}

#[tokio::test]
async fn reset_returns_to_idle_with_a_pooled_prompt() {
    let timeline = Timeline::default();
    let reasons = Arc::new(CannedReasons::ok("No.", timeline.clone()));
    let mut controller = controller(
        &["A", "B"],
        reasons,
        timeline,
        Box::new(RngRandomness::seeded(5)),
    );
    let mut events = controller.subscribe_events();

    controller.start().await.expect("start");
    controller.reset().expect("reset");

    assert_eq!(controller.state(), SessionState::Idle);
    assert_eq!(controller.reason(), None);
    assert_eq!(controller.status_text(), None);
    assert!(catalog(&["A", "B"])
        .prompts()
        .iter()
        .any(|p| p == controller.prompt_text()));
    assert_eq!(
        controller.display(),
        DisplayedText::Prompt(controller.prompt_text())
    );

    let last = drain(&mut events).pop().expect("idle event");
    assert_eq!(
        last,
        ControllerEvent::Idle {
            prompt: controller.prompt_text().to_string()
        }
    );
}

#[tokio::test]
async fn disallowed_transitions_change_nothing() {
    let timeline = Timeline::default();
    let reasons = Arc::new(CannedReasons::ok("No.", timeline.clone()));
    let mut controller = controller(
        &["A", "B"],
        reasons.clone(),
        timeline,
        Box::new(RngRandomness::seeded(9)),
    );
    let prompt = controller.prompt_text().to_string();

    let err = controller.reset().unwrap_err();
    assert_eq!(
        err,
        TransitionError::InvalidTransition {
            from: SessionState::Idle,
            action: UserAction::Reset,
        }
    );
    assert_eq!(controller.state(), SessionState::Idle);
    assert_eq!(controller.prompt_text(), prompt);

    controller.start().await.expect("start");
    let err = controller.start().await.unwrap_err();
    assert_eq!(
        err,
        TransitionError::InvalidTransition {
            from: SessionState::Result,
            action: UserAction::Start,
        }
    );
    assert_eq!(controller.reason(), Some("No."));
    assert_eq!(controller.cycle(), CycleId(1));
    assert_eq!(reasons.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn events_follow_the_cycle_in_order() {
    let timeline = Timeline::default();
    let reasons = Arc::new(CannedReasons::ok("No.", timeline.clone()));
    let randomness = ScriptedRandomness::new()
        .with_indices([1])
        .with_coins([true])
        .with_indices([2, 0]);
    let mut controller = controller(&["A", "B", "C"], reasons, timeline, Box::new(randomness));
    let mut events = controller.subscribe_events();

    controller.start().await.expect("start");

    let cycle = CycleId(1);
    assert_eq!(
        drain(&mut events),
        vec![
            ControllerEvent::Loading {
                cycle,
                planned_steps: 2
            },
            ControllerEvent::Status {
                cycle,
                step: 1,
                total: 2,
                text: "C".into()
            },
            ControllerEvent::Status {
                cycle,
                step: 2,
                total: 2,
                text: "A".into()
            },
            ControllerEvent::FetchingReason { cycle },
            ControllerEvent::Result {
                cycle,
                reason: "No.".into()
            },
        ]
    );
}

#[tokio::test]
async fn cycles_are_numbered_across_resets() {
    let timeline = Timeline::default();
    let reasons = Arc::new(CannedReasons::ok("No.", timeline.clone()));
    let mut controller = controller(
        &["A", "B", "C"],
        reasons,
        timeline,
        Box::new(RngRandomness::seeded(1)),
    );

    assert_eq!(controller.cycle(), CycleId(0));
    for expected in 1..=3 {
        controller.start().await.expect("start");
        assert_eq!(controller.cycle(), CycleId(expected));
        controller.reset().expect("reset");
    }
}

#[test]
fn loading_displays_the_latest_status_phrase() {
    let timeline = Timeline::default();
    let reasons = Arc::new(CannedReasons::ok("No.", timeline.clone()));
    let mut controller = controller(&["A", "B"], reasons, timeline, Box::new(RngRandomness::seeded(3)));

    // Mid-cycle state is private to `start`; set it up directly.
    controller.state = SessionState::Loading;
    assert_eq!(controller.display(), DisplayedText::Status(""));

    controller.status = Some("B".into());
    assert_eq!(controller.display(), DisplayedText::Status("B"));
    assert_eq!(controller.display().text(), "B");
}
