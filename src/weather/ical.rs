use super::types::AstroEvent;

const DATE_PREFIX: &str = "DTSTART;VALUE=DATE:";

/// Extract events from an iCal calendar: one per `SUMMARY:` line, dated from
/// the line two above it.
pub fn parse_events(calendar: &str) -> Vec<AstroEvent> {
    let lines: Vec<&str> = calendar.lines().map(|l| l.trim_end_matches('\r')).collect();

    lines
        .iter()
        .enumerate()
        .filter_map(|(i, line)| {
            let summary = line.strip_prefix("SUMMARY:")?;
            let date = i
                .checked_sub(2)
                .map(|j| lines[j].replace(DATE_PREFIX, ""))
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| "Unknown".to_string());
            Some(AstroEvent {
                date,
                summary: summary.to_string(),
            })
        })
        .collect()
}
