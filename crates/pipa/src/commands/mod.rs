//! Command dispatch: bridges CLI args -> `Codec` calls -> output formatting.

pub mod config_cmd;
pub mod counters;
pub mod status;
pub mod streams;
pub mod unit;

use pipa_core::Codec;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a codec-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, codec: &Codec, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Streams(args) => streams::handle(codec, &args, global).await,
        Command::Unit => unit::handle(codec, global).await,
        Command::Counters => counters::handle(codec, global).await,
        Command::Status => status::handle(codec, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
