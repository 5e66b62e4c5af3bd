use crate::error::KickoffFormatError;
use chrono::NaiveDateTime;
use chrono_tz::America::New_York;

/// Upstream kickoff format: UTC, minute precision, literal `Z`
const KICKOFF_FORMAT: &str = "%Y-%m-%dT%H:%MZ";

/// e.g. "Monday, Oct-10-22 1:00PM"
const DISPLAY_FORMAT: &str = "%A, %b-%d-%y %-I:%M%p";

/// Convert an upstream UTC kickoff time to US Eastern display form
pub fn format_kickoff(kickoff_utc: &str) -> Result<String, KickoffFormatError> {
    let naive = NaiveDateTime::parse_from_str(kickoff_utc, KICKOFF_FORMAT).map_err(|source| {
        KickoffFormatError {
            input: kickoff_utc.to_string(),
            source,
        }
    })?;

    Ok(naive
        .and_utc()
        .with_timezone(&New_York)
        .format(DISPLAY_FORMAT)
        .to_string())
}
