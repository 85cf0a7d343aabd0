//! Core of the rejection oracle: the session controller and the seams it runs through.

pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod pacing;
pub mod reason;
pub mod sampler;

#[cfg(test)]
mod test_support;

pub use catalog::PhraseCatalog;
pub use config::{load_settings, Settings};
pub use controller::{ControllerEvent, CycleSettings, DisplayedText, InteractionController};
pub use error::{CatalogError, ConfigError, ReasonFetchError, TransitionError};
pub use pacing::{Pacer, TokioPacer};
pub use reason::{HttpReasonClient, ReasonSource, DEFAULT_REASON_ENDPOINT};
pub use sampler::{NoRepeatSampler, Randomness, RngRandomness};
