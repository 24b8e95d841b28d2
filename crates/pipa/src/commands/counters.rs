//! Receive counter display.

use strum::IntoEnumIterator;
use tabled::Tabled;

use pipa_core::{Channel, Codec, ReceiveCounters, StreamCounters};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
pub(crate) struct CounterRow {
    #[tabled(rename = "Channel")]
    channel: String,
    #[tabled(rename = "Received")]
    received: u64,
    #[tabled(rename = "Dropped")]
    dropped: String,
    #[tabled(rename = "Lost connection")]
    lost: String,
}

impl CounterRow {
    fn new(channel: Channel, counters: &StreamCounters, color: bool) -> Self {
        let flag = |value: u64| {
            if value > 0 {
                output::bad(value, color)
            } else {
                value.to_string()
            }
        };
        Self {
            channel: channel.to_string(),
            received: counters.packets_received,
            dropped: flag(counters.dropped_packets),
            lost: flag(counters.loss_of_connection),
        }
    }
}

pub(crate) fn counters_table(counters: &ReceiveCounters, color: bool) -> String {
    let rows: Vec<CounterRow> = Channel::iter()
        .map(|channel| CounterRow::new(channel, counters.channel(channel), color))
        .collect();
    output::render_table(&rows)
}

/// `<channel> <received> <dropped> <lost>` per channel.
fn plain_lines(counters: &ReceiveCounters) -> String {
    Channel::iter()
        .map(|channel| {
            let c = counters.channel(channel);
            format!(
                "{channel}\t{}\t{}\t{}",
                c.packets_received, c.dropped_packets, c.loss_of_connection
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub async fn handle(codec: &Codec, global: &GlobalOpts) -> Result<(), CliError> {
    let counters = codec.receive_counters().await?;
    let color = output::should_color(&global.color);

    let out = output::render_single(
        &global.output,
        &counters,
        |c| counters_table(c, color),
        plain_lines,
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
