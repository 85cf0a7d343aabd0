//! Backend commands queued from UI to backend worker.

use shared::domain::UserAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendCommand {
    Ask,
    Reset,
}

impl BackendCommand {
    pub fn name(self) -> &'static str {
        self.action().label()
    }

    pub fn action(self) -> UserAction {
        match self {
            BackendCommand::Ask => UserAction::Start,
            BackendCommand::Reset => UserAction::Reset,
        }
    }
}
