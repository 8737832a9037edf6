/// All CRM record identifiers are server-assigned 64-bit sequence values.
pub type DbId = i64;

/// Calendar dates travel as `YYYY-MM-DD` strings on the wire.
pub type Date = chrono::NaiveDate;

/// Wire format for [`Date`] values.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a calendar date in wire format.
pub fn parse_date(value: &str) -> Result<Date, chrono::ParseError> {
    Date::parse_from_str(value, DATE_FORMAT)
}

/// Format a calendar date in wire format.
pub fn format_date(date: &Date) -> String {
    date.format(DATE_FORMAT).to_string()
}
