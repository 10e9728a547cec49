// Flight records and the weekday handling used by catalog queries
use chrono::Weekday;
use std::fmt;
use std::str::FromStr;

// Airport codes starting with this letter are in the home country
pub const DOMESTIC_MARKER: char = 'Y';

pub const UNKNOWN_AIRLINE: &str = "Unidentified Flying Object";

// Airline names keyed by the first two characters of a flight code
const AIRLINES: [(&str, &str); 4] = [
    ("OA", "Otto Airlines"),
    ("CA", "Conned Air"),
    ("TB", "Try a Bus Airways"),
    ("VA", "Vertical Airways"),
];

/// Derive the airline name from a flight code prefix.
///
/// Unrecognized prefixes map to [`UNKNOWN_AIRLINE`] rather than failing.
pub fn airline_for_code(code: &str) -> &'static str {
    AIRLINES
        .iter()
        .find(|&&(prefix, _)| code.starts_with(prefix))
        .map_or(UNKNOWN_AIRLINE, |&(_, name)| name)
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Flight {
    pub code: String,
    pub airline: String,
    pub from: String,
    pub to: String,
    pub weekday: Weekday,
    pub time: String,
    pub seats: u32,
    pub cost_per_seat: f64,
}

impl Flight {
    // The airline name is always derived from the code
    pub fn new(
        code: &str,
        from: &str,
        to: &str,
        weekday: Weekday,
        time: &str,
        seats: u32,
        cost_per_seat: f64,
    ) -> Self {
        Self {
            code: code.to_string(),
            airline: airline_for_code(code).to_string(),
            from: from.to_string(),
            to: to.to_string(),
            weekday,
            time: time.to_string(),
            seats,
            cost_per_seat,
        }
    }

    pub fn is_domestic(&self) -> bool {
        self.from.starts_with(DOMESTIC_MARKER) && self.to.starts_with(DOMESTIC_MARKER)
    }
}

impl fmt::Display for Flight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, From: {}, To: {}, Day: {}, Time: {}, Seats: {}, Cost: {:.2}",
            self.code,
            self.from,
            self.to,
            weekday_name(self.weekday),
            self.time,
            self.seats,
            self.cost_per_seat
        )
    }
}

// Weekday criterion for flight searches; `Any` never appears on a Flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayFilter {
    #[default]
    Any,
    On(Weekday),
}

impl DayFilter {
    pub fn matches(&self, day: Weekday) -> bool {
        match self {
            DayFilter::Any => true,
            DayFilter::On(wanted) => *wanted == day,
        }
    }
}

impl FromStr for DayFilter {
    type Err = chrono::ParseWeekdayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("any") {
            return Ok(DayFilter::Any);
        }
        s.parse::<Weekday>().map(DayFilter::On)
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayFilter::Any => f.write_str("Any"),
            DayFilter::On(day) => f.write_str(weekday_name(*day)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("OA-1234", "Otto Airlines"; "otto")]
    #[test_case("CA-0001", "Conned Air"; "conned")]
    #[test_case("TB-4444", "Try a Bus Airways"; "bus")]
    #[test_case("VA-9000", "Vertical Airways"; "vertical")]
    #[test_case("ZZ-1000", UNKNOWN_AIRLINE; "unknown prefix")]
    #[test_case("", UNKNOWN_AIRLINE; "empty code")]
    fn test_airline_for_code(code: &str, expected: &str) {
        assert_eq!(airline_for_code(code), expected);
    }

    #[test_case("YYZ", "YVR", true; "both domestic")]
    #[test_case("YYC", "LAX", false; "outbound")]
    #[test_case("JFK", "YEG", false; "inbound")]
    #[test_case("JFK", "LAX", false; "foreign")]
    fn test_is_domestic(from: &str, to: &str, expected: bool) {
        let flight = Flight::new("OA101", from, to, Weekday::Mon, "09:00", 10, 100.0);
        assert_eq!(flight.is_domestic(), expected);
    }

    #[test]
    fn test_flight_display() {
        let flight = Flight::new("OA101", "YYZ", "YVR", Weekday::Mon, "09:30", 2, 150.0);
        assert_eq!(
            flight.to_string(),
            "OA101, From: YYZ, To: YVR, Day: Monday, Time: 09:30, Seats: 2, Cost: 150.00"
        );
        assert_eq!(flight.airline, "Otto Airlines");
    }

    #[test]
    fn test_day_filter_parsing() {
        assert_eq!("Any".parse::<DayFilter>().unwrap(), DayFilter::Any);
        assert_eq!("any".parse::<DayFilter>().unwrap(), DayFilter::Any);
        assert_eq!(
            "Monday".parse::<DayFilter>().unwrap(),
            DayFilter::On(Weekday::Mon)
        );
        assert_eq!(
            " friday ".parse::<DayFilter>().unwrap(),
            DayFilter::On(Weekday::Fri)
        );
        assert!("Someday".parse::<DayFilter>().is_err());
    }

    #[test]
    fn test_day_filter_matches() {
        assert!(DayFilter::Any.matches(Weekday::Sun));
        assert!(DayFilter::On(Weekday::Tue).matches(Weekday::Tue));
        assert!(!DayFilter::On(Weekday::Tue).matches(Weekday::Wed));
        assert_eq!(DayFilter::On(Weekday::Sat).to_string(), "Saturday");
    }
}
