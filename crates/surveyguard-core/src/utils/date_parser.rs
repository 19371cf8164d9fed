use chrono::{
    NaiveDateTime,
    format::{Parsed, StrftimeItems, parse},
};

/// Parse `input` with a strftime-style `format`.
///
/// Fields the format does not mention take the defaults 1900-01-01 00:00:00,
/// so `%Y-%m` gives the first of the month and `%H:%M` a time on
/// 1900-01-01. Impossible dates (month 13, February 30) are `None`, as is
/// whitespace the format does not ask for.
pub fn parse_datetime(input: &str, format: &str) -> Option<NaiveDateTime> {
    if input.starts_with(char::is_whitespace) && !format.starts_with(char::is_whitespace) {
        return None;
    }
    let mut parsed = Parsed::new();
    parse(&mut parsed, input, StrftimeItems::new(format)).ok()?;
    fill_defaults(&mut parsed).ok()?;

    let date = parsed.to_naive_date().ok()?;
    let time = parsed.to_naive_time().ok()?;
    Some(date.and_time(time))
}

fn fill_defaults(parsed: &mut Parsed) -> chrono::ParseResult<()> {
    let has_year = parsed.year().is_some()
        || parsed.year_div_100().is_some()
        || parsed.year_mod_100().is_some()
        || parsed.isoyear().is_some();
    if !has_year {
        parsed.set_year(1900)?;
    }

    // Ordinal and week numbers place the day on their own
    let has_week_or_ordinal = parsed.ordinal().is_some()
        || parsed.isoweek().is_some()
        || parsed.week_from_sun().is_some()
        || parsed.week_from_mon().is_some();
    if !has_week_or_ordinal {
        if parsed.month().is_none() {
            parsed.set_month(1)?;
        }
        if parsed.day().is_none() {
            parsed.set_day(1)?;
        }
    }

    match (parsed.hour_div_12(), parsed.hour_mod_12()) {
        (None, None) => parsed.set_hour(0)?,
        (None, Some(_)) => parsed.set_ampm(false)?,
        (Some(_), None) => parsed.set_hour12(12)?,
        (Some(_), Some(_)) => {}
    }
    if parsed.minute().is_none() {
        parsed.set_minute(0)?;
    }
    if parsed.second().is_none() {
        parsed.set_second(0)?;
    }
    Ok(())
}
