//! Combined status view: one poll, three sections.

use std::fmt::Write as _;

use pipa_core::{Codec, CodecStatus};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::counters::counters_table;
use super::streams::{StreamRow, plain_line};

fn detail(status: &CodecStatus, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Unit: {}", status.unit_name);
    let _ = writeln!(out);

    if status.rx_streams.is_empty() {
        let _ = writeln!(out, "No receive streams configured");
    } else {
        let rows: Vec<StreamRow> = status
            .rx_streams
            .iter()
            .map(|s| StreamRow::new(s, color))
            .collect();
        let _ = writeln!(out, "{}", output::render_table(&rows));
    }
    let _ = writeln!(out);
    out.push_str(&counters_table(&status.counters, color));
    out
}

fn plain(status: &CodecStatus) -> String {
    std::iter::once(status.unit_name.clone())
        .chain(status.rx_streams.iter().map(plain_line))
        .collect::<Vec<_>>()
        .join("\n")
}

pub async fn handle(codec: &Codec, global: &GlobalOpts) -> Result<(), CliError> {
    let status = codec.status().await?;
    let color = output::should_color(&global.color);

    let out = output::render_single(&global.output, &status, |s| detail(s, color), plain);
    output::print_output(&out, global.quiet);
    Ok(())
}
