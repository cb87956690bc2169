use super::output::ParseError;
use crate::external::command::{CommandLine, CommandRunner};
use std::collections::HashSet;

/// Serial numbers of the monitors which can be controlled over DDC/CI
pub type CapabilitySet = HashSet<String>;

pub fn detect_command() -> CommandLine {
    CommandLine::new("ddcutil", ["detect", "--brief"])
}

/// Find out which monitors support DDC/CI.
///
/// Never fails: when detection doesn't work, no monitor is considered
/// capable and automatic selection falls back to the backlight backend.
pub async fn probe<R: CommandRunner>(runner: &R) -> CapabilitySet {
    let output = match runner.run(&detect_command()).await {
        Ok(output) => output,
        Err(e) => {
            log::warn!("DDC/CI detection failed: {}", e);
            return CapabilitySet::new();
        }
    };
    match parse_detect_output(&output) {
        Ok(serials) => {
            log::info!("Found {} DDC/CI capable monitor(s)", serials.len());
            serials
        }
        Err(e) => {
            log::warn!("Couldn't understand DDC/CI detection output: {}", e);
            CapabilitySet::new()
        }
    }
}

/// Collect serials from the output of `ddcutil detect --brief`.
///
/// Records are separated by blank lines. Only records headed by
/// `Display <n>` count, their serial is the 4th colon-separated field of the
/// 4th line (`Monitor: MFG:MODEL:SERIAL`). Monitors reporting no serial are
/// skipped, a display record too short to have a `Monitor` line makes the
/// whole output invalid.
pub fn parse_detect_output(output: &str) -> Result<CapabilitySet, ParseError> {
    let mut serials = CapabilitySet::new();
    for record in records(output) {
        if !is_display_header(record[0]) {
            log::debug!("Skipping record {:?}", record[0]);
            continue;
        }
        let monitor_line = record
            .get(3)
            .ok_or_else(|| ParseError::MissingSerial(record.join("\n")))?;
        match monitor_line
            .split(':')
            .nth(3)
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            Some(serial) => {
                serials.insert(serial.to_owned());
            }
            None => log::warn!(
                "{} reports no serial number, it can't be matched: {:?}",
                record[0].trim(),
                record.join("\n")
            ),
        }
    }
    Ok(serials)
}

fn records(output: &str) -> Vec<Vec<&str>> {
    let mut records = Vec::new();
    let mut current = Vec::new();
    for line in output.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                records.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        records.push(current);
    }
    records
}

fn is_display_header(line: &str) -> bool {
    line.strip_prefix("Display ")
        .map(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
        .unwrap_or(false)
}
