// Flight reservation system: catalog, reservation store and booking engine

pub mod booking;
pub mod catalog;
pub mod codec;
pub mod config;
pub mod flight;
pub mod query;
pub mod reservation;
pub mod store;
pub mod system;

// Re-export key types for convenience
pub use booking::{available_seats, BookingEngine, BookingError};
pub use catalog::{CatalogError, FlightCatalog};
pub use config::{Config, ConfigError};
pub use flight::{DayFilter, Flight};
pub use query::{find_reservation_by_code, find_reservations, ReservationFilter};
pub use reservation::{Reservation, ReservationError};
pub use store::{LoadIssue, ReservationStore, StoreError};
pub use system::{ReservationSystem, StartupError};
