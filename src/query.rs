// Reservation lookups used by the search screen
use crate::reservation::Reservation;
use crate::store::ReservationStore;

// Substring criteria, AND-combined; an empty string matches everything
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReservationFilter {
    pub code: String,
    pub airline: String,
    pub name: String,
}

impl ReservationFilter {
    pub fn new(code: &str, airline: &str, name: &str) -> Self {
        Self {
            code: code.to_string(),
            airline: airline.to_string(),
            name: name.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty() && self.airline.is_empty() && self.name.is_empty()
    }

    pub fn matches(&self, reservation: &Reservation) -> bool {
        reservation.code().contains(self.code.as_str())
            && reservation.airline().contains(self.airline.as_str())
            && reservation.name().contains(self.name.as_str())
    }
}

/// Reservations matching every criterion of `filter`, in store order.
///
/// A filter with all three criteria empty returns nothing rather than the
/// whole store.
pub fn find_reservations<'s>(
    store: &'s ReservationStore,
    filter: &ReservationFilter,
) -> Vec<&'s Reservation> {
    if filter.is_empty() {
        return Vec::new();
    }

    let mut found = Vec::new();
    for reservation in store.reservations() {
        if !filter.matches(reservation) {
            continue;
        }
        found.push(reservation);
    }
    found
}

pub fn find_reservation_by_code<'s>(
    store: &'s ReservationStore,
    code: &str,
) -> Option<&'s Reservation> {
    store.reservations().iter().find(|r| r.code() == code)
}
