// Booking engine: validates a request, checks seats and issues reservations
use crate::flight::Flight;
use crate::reservation::{validate_traveler, Reservation, ReservationError};
use crate::store::{ReservationStore, StoreError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

pub const DEFAULT_MAX_CODE_ATTEMPTS: u32 = 64;

const DOMESTIC_PREFIX: char = 'D';
const INTERNATIONAL_PREFIX: char = 'I';

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("No flight selected")]
    NoFlight,

    #[error("No seats left on flight {0}")]
    SeatsExhausted(String),

    #[error("Traveler name must not be empty")]
    InvalidName,

    #[error("Traveler citizenship must not be empty")]
    InvalidCitizenship,

    #[error("No unused reservation code found after {0} attempts")]
    CodeSpaceExhausted(u32),

    // The reservation exists in memory but the backing file was not updated
    #[error("Reservation {} was booked but could not be saved: {source}", .reservation.code())]
    NotPersisted {
        reservation: Reservation,
        #[source]
        source: StoreError,
    },
}

impl From<ReservationError> for BookingError {
    fn from(err: ReservationError) -> Self {
        match err {
            ReservationError::InvalidName => BookingError::InvalidName,
            ReservationError::InvalidCitizenship => BookingError::InvalidCitizenship,
        }
    }
}

/// Seats on `flight` not taken by an active reservation.
pub fn available_seats(store: &ReservationStore, flight: &Flight) -> u32 {
    let used = store
        .reservations()
        .iter()
        .filter(|r| r.is_active() && r.flight_code() == flight.code)
        .count();
    flight.seats.saturating_sub(u32::try_from(used).unwrap_or(u32::MAX))
}

pub struct BookingEngine<'a, R = StdRng> {
    store: &'a mut ReservationStore,
    rng: R,
    max_code_attempts: u32,
}

impl<'a> BookingEngine<'a, StdRng> {
    pub fn new(store: &'a mut ReservationStore) -> Self {
        Self::with_rng(store, StdRng::from_entropy())
    }
}

impl<'a, R: Rng> BookingEngine<'a, R> {
    pub fn with_rng(store: &'a mut ReservationStore, rng: R) -> Self {
        Self {
            store,
            rng,
            max_code_attempts: DEFAULT_MAX_CODE_ATTEMPTS,
        }
    }

    pub fn max_code_attempts(mut self, attempts: u32) -> Self {
        self.max_code_attempts = attempts.max(1);
        self
    }

    pub fn available_seats(&self, flight: &Flight) -> u32 {
        available_seats(&*self.store, flight)
    }

    /// Book one seat on `flight` for the given traveler.
    ///
    /// Checks run in a fixed order: missing flight, name, citizenship, then
    /// seat availability. On success the reservation is active, carries the
    /// flight's airline and cost, and has been appended to the store.
    pub fn reserve(
        &mut self,
        flight: Option<&Flight>,
        name: &str,
        citizenship: &str,
    ) -> Result<Reservation, BookingError> {
        let flight = flight.ok_or(BookingError::NoFlight)?;
        validate_traveler(name, citizenship)?;

        if self.available_seats(flight) == 0 {
            return Err(BookingError::SeatsExhausted(flight.code.clone()));
        }

        let code = self.generate_code(flight)?;
        let reservation = Reservation::new(
            &code,
            &flight.code,
            &flight.airline,
            name,
            citizenship,
            flight.cost_per_seat,
            true,
        )?;

        tracing::info!(
            "Booked {} on {} for {} ({} seats left)",
            code,
            flight.code,
            name,
            self.available_seats(flight).saturating_sub(1)
        );

        if let Err(source) = self.store.append(reservation.clone()) {
            return Err(BookingError::NotPersisted {
                reservation,
                source,
            });
        }
        Ok(reservation)
    }

    // <D|I><1000..=9999>, redrawn while the store already holds the code
    fn generate_code(&mut self, flight: &Flight) -> Result<String, BookingError> {
        let prefix = if flight.is_domestic() {
            DOMESTIC_PREFIX
        } else {
            INTERNATIONAL_PREFIX
        };

        for _ in 0..self.max_code_attempts {
            let code = format!("{}{}", prefix, self.rng.gen_range(1000..=9999));
            if !self.store.contains_code(&code) {
                return Ok(code);
            }
            tracing::debug!("Reservation code {} already taken, drawing again", code);
        }
        Err(BookingError::CodeSpaceExhausted(self.max_code_attempts))
    }
}
