//! Backend -> UI events and error modeling for the desktop window.

use oracle_core::ControllerEvent;

pub enum UiEvent {
    BackendReady { prompt: String },
    Info(String),
    Error(UiError),
    Controller(ControllerEvent),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Config,
    Transition,
    Transport,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Ask,
    Reset,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("cannot start")
            || message_lower.contains("cannot reset")
        {
            UiErrorCategory::Transition
        } else if message_lower.contains("settings")
            || message_lower.contains("phrase")
            || message_lower.contains("endpoint")
            || message_lower.contains("fallback")
        {
            UiErrorCategory::Config
        } else if message_lower.contains("runtime")
            || message_lower.contains("connection")
            || message_lower.contains("disconnect")
            || message_lower.contains("queue")
            || message_lower.contains("client")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    /// Startup failures leave no controller behind, so the window cannot recover.
    pub fn is_fatal(&self) -> bool {
        self.context == UiErrorContext::BackendStartup
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Config => "Configuration",
        UiErrorCategory::Transition => "State",
        UiErrorCategory::Transport => "Backend",
        UiErrorCategory::Unknown => "Unexpected",
    }
}
