//! Device actions
//!
//! Everything the model can do to the phone: the tool catalog it is offered,
//! decoding of its tool calls, and the executor that runs them against
//! Termux:API commands and the local notes directory.

pub mod action;
pub mod catalog;
pub mod clock;
pub mod executor;
pub mod notes;
pub mod runner;

pub use action::{ActionDecodeError, DeviceAction};
pub use catalog::action_catalog;
pub use clock::{Clock, FixedClock, SystemClock};
pub use executor::{ActionOutcome, ActionStatus, DeviceExecutor, ToolExecutor};
pub use notes::NoteStore;
pub use runner::{CommandOutput, CommandRunner, SystemCommandRunner, DEFAULT_COMMAND_TIMEOUT};
