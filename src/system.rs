// The surface the UI layer talks to. It owns the catalog and the store and
// lends them to the booking engine and query functions per call.
use crate::booking::{self, BookingEngine, BookingError};
use crate::catalog::{CatalogError, FlightCatalog};
use crate::config::Config;
use crate::flight::{DayFilter, Flight};
use crate::query::{self, ReservationFilter};
use crate::reservation::Reservation;
use crate::store::{LoadIssue, ReservationStore, StoreError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Failed to load reference data: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Failed to load reservations: {0}")]
    Store(#[from] StoreError),
}

pub struct ReservationSystem {
    catalog: FlightCatalog,
    store: ReservationStore,
    max_code_attempts: u32,
}

impl ReservationSystem {
    pub fn new(catalog: FlightCatalog, store: ReservationStore, config: &Config) -> Self {
        Self {
            catalog,
            store,
            max_code_attempts: config.max_code_attempts,
        }
    }

    // Reference data first; a malformed flight or airport file is fatal
    pub fn open(config: &Config) -> Result<Self, StartupError> {
        let catalog = FlightCatalog::open(&config.flights_path, &config.airports_path)?;
        let store = ReservationStore::open(&config.reservations_path)?;

        tracing::info!(
            "Reservation system ready: {} flights, {} airports, {} reservations",
            catalog.flights().len(),
            catalog.airports().len(),
            store.len()
        );

        Ok(Self::new(catalog, store, config))
    }

    pub fn airports(&self) -> &[String] {
        self.catalog.airports()
    }

    pub fn flights(&self) -> &[Flight] {
        self.catalog.flights()
    }

    pub fn find_flight_by_code(&self, code: &str) -> Option<&Flight> {
        self.catalog.find_flight_by_code(code)
    }

    pub fn find_flights(&self, from: &str, to: &str, day: DayFilter) -> Vec<&Flight> {
        self.catalog.find_flights(from, to, day)
    }

    pub fn available_seats(&self, flight: &Flight) -> u32 {
        booking::available_seats(&self.store, flight)
    }

    /// Book a seat on the flight with `flight_code`.
    ///
    /// An unknown code fails with [`BookingError::NoFlight`].
    pub fn make_reservation(
        &mut self,
        flight_code: &str,
        name: &str,
        citizenship: &str,
    ) -> Result<Reservation, BookingError> {
        let flight = self.catalog.find_flight_by_code(flight_code);
        BookingEngine::new(&mut self.store)
            .max_code_attempts(self.max_code_attempts)
            .reserve(flight, name, citizenship)
    }

    pub fn find_reservations(&self, code: &str, airline: &str, name: &str) -> Vec<&Reservation> {
        query::find_reservations(&self.store, &ReservationFilter::new(code, airline, name))
    }

    pub fn find_reservation_by_code(&self, code: &str) -> Option<&Reservation> {
        query::find_reservation_by_code(&self.store, code)
    }

    // Returns Ok(false) for an unknown code
    pub fn set_reservation_active(&mut self, code: &str, active: bool) -> Result<bool, StoreError> {
        self.store.set_active(code, active)
    }

    pub fn reservations(&self) -> &[Reservation] {
        self.store.reservations()
    }

    pub fn load_issues(&self) -> &[LoadIssue] {
        self.store.load_issues()
    }
}
