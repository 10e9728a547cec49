// Flight catalog: static reference data loaded once at startup
use crate::codec::FLIGHT_CODE_WIDTH;
use crate::flight::{DayFilter, Flight};
use chrono::{NaiveTime, Weekday};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Malformed line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },
}

const FLIGHT_FIELDS: usize = 7;
const AIRPORT_FIELDS: usize = 2;

#[derive(Debug, Clone, Default)]
pub struct FlightCatalog {
    flights: Vec<Flight>,
    airports: Vec<String>,
}

impl FlightCatalog {
    pub fn new(flights: Vec<Flight>, airports: Vec<String>) -> Self {
        Self { flights, airports }
    }

    // Load both reference files; any malformed line fails the whole load
    pub fn open(
        flights_path: impl AsRef<Path>,
        airports_path: impl AsRef<Path>,
    ) -> Result<Self, CatalogError> {
        let flights = Self::load_flights(File::open(flights_path.as_ref())?)?;
        let airports = Self::load_airports(File::open(airports_path.as_ref())?)?;

        tracing::debug!(
            "Loaded {} flights and {} airports",
            flights.len(),
            airports.len()
        );

        Ok(Self::new(flights, airports))
    }

    pub fn load_flights(source: impl Read) -> Result<Vec<Flight>, CatalogError> {
        let mut flights = Vec::new();
        for (line_no, line) in BufReader::new(source).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            flights.push(parse_flight(&line).map_err(|reason| CatalogError::MalformedLine {
                line: line_no + 1,
                reason,
            })?);
        }
        Ok(flights)
    }

    // The airport full name is read but not kept
    pub fn load_airports(source: impl Read) -> Result<Vec<String>, CatalogError> {
        let mut airports = Vec::new();
        for (line_no, line) in BufReader::new(source).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let fields = split_fields(&line, AIRPORT_FIELDS).map_err(|reason| {
                CatalogError::MalformedLine {
                    line: line_no + 1,
                    reason,
                }
            })?;
            if fields[0].is_empty() {
                return Err(CatalogError::MalformedLine {
                    line: line_no + 1,
                    reason: "empty airport code".to_string(),
                });
            }
            airports.push(fields[0].to_string());
        }
        Ok(airports)
    }

    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    pub fn airports(&self) -> &[String] {
        &self.airports
    }

    pub fn find_flight_by_code(&self, code: &str) -> Option<&Flight> {
        self.flights.iter().find(|flight| flight.code == code)
    }

    // Results keep catalog order
    pub fn find_flights(&self, from: &str, to: &str, day: DayFilter) -> Vec<&Flight> {
        self.flights
            .iter()
            .filter(|flight| flight.from == from && flight.to == to && day.matches(flight.weekday))
            .collect()
    }
}

fn split_fields(line: &str, expected: usize) -> Result<Vec<&str>, String> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != expected {
        return Err(format!(
            "expected {} fields, found {}",
            expected,
            fields.len()
        ));
    }
    Ok(fields)
}

fn parse_flight(line: &str) -> Result<Flight, String> {
    let fields = split_fields(line, FLIGHT_FIELDS)?;
    let (code, from, to) = (fields[0], fields[1], fields[2]);

    if code.is_empty() || from.is_empty() || to.is_empty() {
        return Err("code, origin and destination are required".to_string());
    }
    // Longer codes would be cut short in the reservation file and stop
    // matching their flight after a reload
    if code.len() > FLIGHT_CODE_WIDTH {
        return Err(format!(
            "flight code '{}' is longer than {} bytes",
            code, FLIGHT_CODE_WIDTH
        ));
    }

    let weekday: Weekday = fields[3]
        .parse()
        .map_err(|_| format!("invalid weekday '{}'", fields[3]))?;

    let time = fields[4];
    NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|e| format!("invalid departure time '{}': {}", time, e))?;

    let seats: u32 = fields[5]
        .parse()
        .map_err(|_| format!("invalid seat count '{}'", fields[5]))?;
    if seats == 0 {
        return Err("seat count must be positive".to_string());
    }

    let cost_per_seat: f64 = fields[6]
        .parse()
        .map_err(|_| format!("invalid cost '{}'", fields[6]))?;
    if !cost_per_seat.is_finite() || cost_per_seat < 0.0 {
        return Err(format!("cost must be non-negative, got {}", cost_per_seat));
    }

    Ok(Flight::new(code, from, to, weekday, time, seats, cost_per_seat))
}
