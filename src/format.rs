use std::io::Write;

use jiff::Timestamp;
use jiff::tz::TimeZone;

use crate::api::VideoRecord;
use crate::config::{CHANNEL_WIDTH_LIMIT, TITLE_WIDTH_LIMIT};
use crate::error::Result;

const DATE_WIDTH: usize = 10;
const VIEWS_WIDTH: usize = 8;
const ELLIPSIS: &str = "...";

/// Rendered in place of a publish date that does not parse
const ZERO_DATE: &str = "1.01.0001";

const SI_PREFIXES: &[&str] = &["k", "M", "G", "T", "P", "E"];

/// Display widths of the two variable-width columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnWidths {
    pub title: usize,
    pub channel: usize,
}

impl ColumnWidths {
    /// Longest value per column, measured in code points, capped at the limits.
    pub fn measure(records: &[VideoRecord], title_limit: usize, channel_limit: usize) -> Self {
        let longest = |field: fn(&VideoRecord) -> &str| {
            records
                .iter()
                .map(|r| field(r).chars().count())
                .max()
                .unwrap_or(0)
        };

        Self {
            title: longest(|r| r.title.as_str()).min(title_limit),
            channel: longest(|r| r.channel_title.as_str()).min(channel_limit),
        }
    }
}

/// Shorten `s` to at most `width` code points, marking the cut with "...".
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let kept: String = s.chars().take(width.saturating_sub(ELLIPSIS.len())).collect();
    format!("{}{}", kept, ELLIPSIS)
}

/// Render an RFC 3339 timestamp as `M.DD.YYYY` in UTC.
pub fn format_date(published_at: &str) -> String {
    match published_at.parse::<Timestamp>() {
        Ok(ts) => {
            let date = ts.to_zoned(TimeZone::UTC).date();
            format!("{}.{:02}.{:04}", date.month(), date.day(), date.year())
        }
        Err(e) => {
            tracing::warn!(published_at, error = %e, "Error parsing date");
            ZERO_DATE.to_string()
        }
    }
}

/// Format a count with an SI prefix and two decimals (`1200000` -> `1.20M`).
///
/// Counts below one thousand are printed as-is.
pub fn format_views(count: u64) -> String {
    if count < 1000 {
        return count.to_string();
    }

    let mut value = count as f64;
    let mut prefix = 0;
    while value >= 1000.0 && prefix < SI_PREFIXES.len() {
        value /= 1000.0;
        prefix += 1;
    }

    // 999_999 would otherwise print as "1000.00k"
    if (value * 100.0).round() >= 100_000.0 && prefix < SI_PREFIXES.len() {
        value /= 1000.0;
        prefix += 1;
    }

    format!("{:.2}{}", value, SI_PREFIXES[prefix - 1])
}

/// Format a single table row.
pub fn format_row(record: &VideoRecord, widths: ColumnWidths) -> String {
    format!(
        "{:<tw$} | {:<cw$} | {:>dw$} | {:>vw$} | {}",
        truncate(&record.title, widths.title),
        truncate(&record.channel_title, widths.channel),
        format_date(&record.published_at),
        format_views(record.view_count),
        record.id,
        tw = widths.title,
        cw = widths.channel,
        dw = DATE_WIDTH,
        vw = VIEWS_WIDTH,
    )
}

/// Write the whole table, one line per record, in the order given.
pub fn print_videos<W: Write>(out: &mut W, records: &[VideoRecord]) -> Result<()> {
    let widths = ColumnWidths::measure(records, TITLE_WIDTH_LIMIT, CHANNEL_WIDTH_LIMIT);

    for record in records {
        writeln!(out, "{}", format_row(record, widths))?;
    }

    out.flush()?;
    Ok(())
}
