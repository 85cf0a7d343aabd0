//! The idle -> loading -> result session machine behind every front end.

use std::{sync::Arc, time::Duration};

use shared::domain::{CycleId, SessionState, UserAction};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::{
    catalog::PhraseCatalog,
    config::{DEFAULT_FALLBACK_REASON, DEFAULT_STATUS_INTERVAL_MS},
    error::TransitionError,
    pacing::{Pacer, TokioPacer},
    reason::ReasonSource,
    sampler::{NoRepeatSampler, Randomness, RngRandomness},
};

pub const MIN_STATUS_STEPS: usize = 2;
pub const MAX_STATUS_STEPS: usize = 3;
const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleSettings {
    pub status_interval: Duration,
    pub fallback_reason: String,
}

impl Default for CycleSettings {
    fn default() -> Self {
        Self {
            status_interval: Duration::from_millis(DEFAULT_STATUS_INTERVAL_MS),
            fallback_reason: DEFAULT_FALLBACK_REASON.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    Idle {
        prompt: String,
    },
    Loading {
        cycle: CycleId,
        planned_steps: usize,
    },
    Status {
        cycle: CycleId,
        step: usize,
        total: usize,
        text: String,
    },
    FetchingReason {
        cycle: CycleId,
    },
    Result {
        cycle: CycleId,
        reason: String,
    },
}

/// The one string on screen for the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayedText<'a> {
    Prompt(&'a str),
    Status(&'a str),
    Reason(&'a str),
}

impl<'a> DisplayedText<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            DisplayedText::Prompt(text)
            | DisplayedText::Status(text)
            | DisplayedText::Reason(text) => text,
        }
    }
}

pub struct InteractionController {
    catalog: Arc<PhraseCatalog>,
    reasons: Arc<dyn ReasonSource>,
    pacer: Arc<dyn Pacer>,
    randomness: Box<dyn Randomness>,
    settings: CycleSettings,
    state: SessionState,
    prompt: String,
    status: Option<String>,
    reason: Option<String>,
    cycle: CycleId,
    events: broadcast::Sender<ControllerEvent>,
}

impl InteractionController {
    pub fn new(
        catalog: Arc<PhraseCatalog>,
        reasons: Arc<dyn ReasonSource>,
        settings: CycleSettings,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let mut controller = Self {
            catalog,
            reasons,
            pacer: Arc::new(TokioPacer),
            randomness: Box::new(RngRandomness::from_os()),
            settings,
            state: SessionState::Idle,
            prompt: String::new(),
            status: None,
            reason: None,
            cycle: CycleId::default(),
            events,
        };
        controller.prompt = controller.draw_prompt();
        controller
    }

    pub fn with_pacer(mut self, pacer: Arc<dyn Pacer>) -> Self {
        self.pacer = pacer;
        self
    }

    /// Swaps the draw source. The idle prompt is re-drawn from it.
    pub fn with_randomness(mut self, randomness: Box<dyn Randomness>) -> Self {
        self.randomness = randomness;
        self.prompt = self.draw_prompt();
        self
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ControllerEvent> {
        self.events.subscribe()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn cycle(&self) -> CycleId {
        self.cycle
    }

    pub fn prompt_text(&self) -> &str {
        &self.prompt
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// What a front end would render right now.
    ///
    /// `start` holds the controller for the whole cycle, so outside callers only ever observe
    /// `Prompt` or `Reason` here; loading progress reaches them through
    /// [`ControllerEvent::Status`].
    pub fn display(&self) -> DisplayedText<'_> {
        match self.state {
            SessionState::Idle => DisplayedText::Prompt(&self.prompt),
            SessionState::Loading => {
                DisplayedText::Status(self.status.as_deref().unwrap_or_default())
            }
            SessionState::Result => {
                DisplayedText::Reason(self.reason.as_deref().unwrap_or_default())
            }
        }
    }

    /// Runs one full cycle: 2-3 paced status steps, one reason fetch, then `result`.
    ///
    /// Fetch failures never escape; they become the fallback reason.
    pub async fn start(&mut self) -> Result<String, TransitionError> {
        self.ensure_allowed(UserAction::Start)?;

        self.cycle = self.cycle.next();
        let cycle = self.cycle;
        self.state = SessionState::Loading;
        self.status = None;
        self.reason = None;

        let total = if self.randomness.coin() {
            MIN_STATUS_STEPS
        } else {
            MAX_STATUS_STEPS
        };
        info!(cycle = cycle.0, steps = total, "cycle started");
        self.emit(ControllerEvent::Loading {
            cycle,
            planned_steps: total,
        });

        let mut sampler = NoRepeatSampler::new(self.catalog.statuses().len());
        for step in 1..=total {
            let Some(text) = sampler
                .draw(self.randomness.as_mut())
                .and_then(|idx| self.catalog.status(idx))
                .map(str::to_owned)
            else {
                break;
            };

            debug!(cycle = cycle.0, step, total, status = %text, "status step");
            self.status = Some(text.clone());
            self.emit(ControllerEvent::Status {
                cycle,
                step,
                total,
                text,
            });
            self.pacer.pause(self.settings.status_interval).await;
        }

        self.emit(ControllerEvent::FetchingReason { cycle });
        let reason = match self.reasons.fetch_reason().await {
            Ok(reason) if !reason.trim().is_empty() => reason,
            Ok(_) => {
                warn!(cycle = cycle.0, "reason source returned a blank reason; using fallback");
                self.settings.fallback_reason.clone()
            }
            Err(err) => {
                warn!(cycle = cycle.0, error = %err, "reason fetch failed; using fallback");
                self.settings.fallback_reason.clone()
            }
        };

        self.status = None;
        self.reason = Some(reason.clone());
        self.state = SessionState::Result;
        info!(cycle = cycle.0, "cycle reached result");
        self.emit(ControllerEvent::Result {
            cycle,
            reason: reason.clone(),
        });

        Ok(reason)
    }

    pub fn reset(&mut self) -> Result<(), TransitionError> {
        self.ensure_allowed(UserAction::Reset)?;

        self.reason = None;
        self.status = None;
        self.state = SessionState::Idle;
        self.prompt = self.draw_prompt();
        info!(cycle = self.cycle.0, "reset to idle");
        self.emit(ControllerEvent::Idle {
            prompt: self.prompt.clone(),
        });
        Ok(())
    }

    fn ensure_allowed(&self, action: UserAction) -> Result<(), TransitionError> {
        let (from, _) = action.transition();
        if self.state == from {
            Ok(())
        } else {
            Err(TransitionError::InvalidTransition {
                from: self.state,
                action,
            })
        }
    }

    fn draw_prompt(&mut self) -> String {
        let idx = self.randomness.index(self.catalog.prompts().len());
        self.catalog.prompt(idx).unwrap_or_default().to_string()
    }

    fn emit(&self, event: ControllerEvent) {
        // No subscribers is fine; the terminal front end reads state directly.
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
