//! User interaction: text and voice channels, mode switching, Ctrl-C

pub mod channel;
pub mod mode;
pub mod run;
pub mod shutdown;

pub use channel::{Channel, Heard, TextChannel, VoiceChannel};
pub use mode::{Command, Mode};
pub use run::Interaction;
pub use shutdown::ShutdownCoordinator;
