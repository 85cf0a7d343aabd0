//! Folds backend events into the view model the window renders from.

use oracle_core::ControllerEvent;
use shared::domain::{CycleId, SessionState, UserAction};

use crate::controller::events::{err_label, UiEvent};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewModel {
    pub state: SessionState,
    pub cycle: CycleId,
    pub prompt: String,
    pub status: Option<String>,
    pub reason: Option<String>,
    pub status_line: String,
    pub backend_ready: bool,
    pub fatal: bool,
    /// Action queued to the backend and not yet acknowledged by an event.
    pub awaiting: Option<UserAction>,
}

impl ViewModel {
    pub fn can_ask(&self) -> bool {
        self.backend_ready
            && !self.fatal
            && self.state == SessionState::Idle
            && self.awaiting.is_none()
    }

    pub fn can_reset(&self) -> bool {
        !self.fatal && self.state == SessionState::Result && self.awaiting.is_none()
    }

    /// `"<phrase>..."` while loading, empty before the first step lands.
    pub fn status_display(&self) -> String {
        self.status
            .as_deref()
            .map(|status| format!("{status}..."))
            .unwrap_or_default()
    }
}

/// Applies `event`; returns `false` when it was dropped as stale.
pub fn reduce(view: &mut ViewModel, event: UiEvent) -> bool {
    match event {
        UiEvent::BackendReady { prompt } => {
            view.backend_ready = true;
            view.state = SessionState::Idle;
            view.prompt = prompt;
            view.status_line = "Andy is ready".to_string();
            true
        }
        UiEvent::Info(message) => {
            view.status_line = message;
            true
        }
        UiEvent::Error(err) => {
            tracing::warn!(context = ?err.context(), "{}", err.message());
            view.awaiting = None;
            view.fatal |= err.is_fatal();
            view.status_line = format!("{} error: {}", err_label(err.category()), err.message());
            true
        }
        UiEvent::Controller(event) => reduce_controller(view, event),
    }
}

fn reduce_controller(view: &mut ViewModel, event: ControllerEvent) -> bool {
    match event {
        ControllerEvent::Loading { cycle, .. } => {
            if cycle <= view.cycle {
                return false;
            }
            view.cycle = cycle;
            view.state = SessionState::Loading;
            view.status = None;
            view.reason = None;
            view.awaiting = None;
            true
        }
        ControllerEvent::Status { cycle, text, .. } => {
            if !is_current_loading(view, cycle) {
                return false;
            }
            view.status = Some(text);
            true
        }
        ControllerEvent::FetchingReason { cycle } => {
            if !is_current_loading(view, cycle) {
                return false;
            }
            tracing::debug!(cycle = cycle.0, "backend fetching reason");
            true
        }
        ControllerEvent::Result { cycle, reason } => {
            if !is_current_loading(view, cycle) {
                return false;
            }
            view.state = SessionState::Result;
            view.status = None;
            view.reason = Some(reason);
            true
        }
        ControllerEvent::Idle { prompt } => {
            view.state = SessionState::Idle;
            view.prompt = prompt;
            view.status = None;
            view.reason = None;
            view.awaiting = None;
            true
        }
    }
}

fn is_current_loading(view: &ViewModel, cycle: CycleId) -> bool {
    view.state == SessionState::Loading && view.cycle == cycle
}
