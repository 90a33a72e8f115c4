use chrono::{DateTime, Utc};

/// Format a summary timestamp with tiered display:
/// - Same day: "14:32"
/// - Within a week: "Tue"
/// - Older: "Jan 15"
pub fn format_summary_date(timestamp: &DateTime<Utc>) -> String {
    let now = Utc::now();
    let age = now.signed_duration_since(*timestamp);

    if age.num_hours() < 24 {
        timestamp.format("%H:%M").to_string()
    } else if age.num_days() < 7 {
        timestamp.format("%a").to_string()
    } else {
        timestamp.format("%b %-d").to_string()
    }
}
