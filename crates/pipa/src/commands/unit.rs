//! Unit name lookup.

use serde::Serialize;

use pipa_core::Codec;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct Unit {
    host: String,
    unit_name: String,
}

pub async fn handle(codec: &Codec, global: &GlobalOpts) -> Result<(), CliError> {
    let unit = Unit {
        host: codec.config().host.clone(),
        unit_name: codec.unit_name().await?,
    };

    let out = output::render_single(
        &global.output,
        &unit,
        |u| format!("{}  ({})", u.unit_name, u.host),
        |u| u.unit_name.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
