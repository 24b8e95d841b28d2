//! Stream listing.

use tabled::Tabled;

use pipa_core::{Codec, Direction, StreamRecord};

use crate::cli::{GlobalOpts, OutputFormat, StreamsArgs};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub(crate) struct StreamRow {
    #[tabled(rename = "#")]
    index: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Enabled")]
    enabled: String,
    #[tabled(rename = "Direction")]
    direction: String,
    #[tabled(rename = "Destination")]
    destination: String,
}

impl StreamRow {
    pub(crate) fn new(record: &StreamRecord, color: bool) -> Self {
        let enabled = if record.enabled {
            output::good("yes", color)
        } else {
            output::muted("no", color)
        };
        let direction = match record.direction {
            Direction::Rx => output::good(record.direction, color),
            Direction::Tx => record.direction.to_string(),
        };
        let destination = if record.destination_address.is_empty() {
            output::muted("-", color)
        } else {
            record.destination_address.clone()
        };

        Self {
            index: record.index,
            name: record.name.clone(),
            enabled,
            direction,
            destination,
        }
    }
}

/// `<index>\t<name>` per stream.
pub(crate) fn plain_line(record: &StreamRecord) -> String {
    format!("{}\t{}", record.index, record.name)
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(codec: &Codec, args: &StreamsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let streams = if args.all {
        codec.streams().await?
    } else {
        codec.rx_streams().await?
    };

    if streams.is_empty() && matches!(global.output, OutputFormat::Table) {
        if !global.quiet {
            eprintln!("No streams configured");
        }
        return Ok(());
    }

    let color = output::should_color(&global.color);
    let out = output::render_list(
        &global.output,
        &streams,
        |s| StreamRow::new(s, color),
        plain_line,
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
