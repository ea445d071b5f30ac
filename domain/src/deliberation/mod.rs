//! Deliberation: state machine, progress protocol and checkpoint values.

pub mod checkpoint;
pub mod event;
pub mod state;

pub use checkpoint::{ChairDirective, DirectiveKind, HumanReply, InitialDifferential};
pub use event::ProgressEvent;
pub use state::{DeliberationState, DeliberationTracker, RoundStep};
