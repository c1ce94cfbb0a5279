pub mod agent;
pub mod appointment;
pub mod notification;
pub mod session;
pub mod slot;

pub use agent::*;
pub use appointment::*;
pub use notification::*;
pub use session::*;
pub use slot::*;

use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};

/// Current instant as an RFC 3339 UTC string, the canonical timestamp
/// representation throughout the store.
pub fn now_rfc3339() -> String {
    format_rfc3339(OffsetDateTime::now_utc())
}

pub fn format_rfc3339(instant: OffsetDateTime) -> String {
    instant
        .to_offset(UtcOffset::UTC)
        .format(&Rfc3339)
        .unwrap()
}

/// Parse a caller-supplied RFC 3339 timestamp. Accepts any offset but
/// normalizes to UTC so stored strings stay lexicographically comparable.
pub fn parse_rfc3339(value: &str) -> Result<OffsetDateTime, time::error::Parse> {
    OffsetDateTime::parse(value, &Rfc3339).map(|t| t.to_offset(UtcOffset::UTC))
}
