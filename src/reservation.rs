// A single booked seat and the validation applied when one is built
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReservationError {
    #[error("Traveler name must not be empty")]
    InvalidName,

    #[error("Traveler citizenship must not be empty")]
    InvalidCitizenship,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    code: String,
    flight_code: String,
    airline: String,
    name: String,
    citizenship: String,
    cost: f64,
    active: bool,
}

impl Reservation {
    // Name is checked before citizenship. The flight code is not
    // validated against the catalog here.
    pub fn new(
        code: &str,
        flight_code: &str,
        airline: &str,
        name: &str,
        citizenship: &str,
        cost: f64,
        active: bool,
    ) -> Result<Self, ReservationError> {
        validate_traveler(name, citizenship)?;

        Ok(Self {
            code: code.to_string(),
            flight_code: flight_code.to_string(),
            airline: airline.to_string(),
            name: name.trim().to_string(),
            citizenship: citizenship.trim().to_string(),
            cost,
            active,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn flight_code(&self) -> &str {
        &self.flight_code
    }

    pub fn airline(&self) -> &str {
        &self.airline
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn citizenship(&self) -> &str {
        &self.citizenship
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

/// Check the traveler fields shared by booking and record decoding.
///
/// Whitespace-only values count as empty, since the on-disk format pads
/// text with spaces and could not tell them apart from a missing value.
pub fn validate_traveler(name: &str, citizenship: &str) -> Result<(), ReservationError> {
    if name.trim().is_empty() {
        return Err(ReservationError::InvalidName);
    }
    if citizenship.trim().is_empty() {
        return Err(ReservationError::InvalidCitizenship);
    }
    Ok(())
}

impl fmt::Display for Reservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_new_reservation_keeps_fields() {
        let reservation =
            Reservation::new("D1234", "OA101", "Otto Airlines", "Ada", "Canada", 150.0, true)
                .unwrap();

        assert_eq!(reservation.code(), "D1234");
        assert_eq!(reservation.flight_code(), "OA101");
        assert_eq!(reservation.airline(), "Otto Airlines");
        assert_eq!(reservation.name(), "Ada");
        assert_eq!(reservation.citizenship(), "Canada");
        assert_eq!(reservation.cost(), 150.0);
        assert!(reservation.is_active());
        assert_eq!(reservation.to_string(), "D1234");
    }

    #[test_case("", "Canada", ReservationError::InvalidName; "empty name")]
    #[test_case("   ", "Canada", ReservationError::InvalidName; "blank name")]
    #[test_case("Ada", "", ReservationError::InvalidCitizenship; "empty citizenship")]
    #[test_case("", "", ReservationError::InvalidName; "name checked first")]
    fn test_new_reservation_rejects(name: &str, citizenship: &str, expected: ReservationError) {
        let result = Reservation::new("I5555", "CA200", "Conned Air", name, citizenship, 10.0, true);
        assert_eq!(result.unwrap_err(), expected);
    }

    #[test]
    fn test_traveler_fields_are_trimmed() {
        let reservation =
            Reservation::new("I5555", "CA200", "Conned Air", " Ada ", "UK  ", 10.0, true).unwrap();
        assert_eq!(reservation.name(), "Ada");
        assert_eq!(reservation.citizenship(), "UK");
    }

    #[test]
    fn test_set_active() {
        let mut reservation =
            Reservation::new("I5555", "CA200", "Conned Air", "Ada", "UK", 10.0, true).unwrap();
        reservation.set_active(false);
        assert!(!reservation.is_active());
    }
}
