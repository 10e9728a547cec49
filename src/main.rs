//! Command-line front end for the flight reservation system.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flight_reservations::{BookingError, Config, DayFilter, ReservationSystem};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "frs")]
#[command(about = "Flight search and reservations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with file locations and booking settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// List known airport codes
    Airports,

    /// List flights, optionally filtered by route and day
    Flights {
        #[arg(long, requires = "to")]
        from: Option<String>,

        #[arg(long, requires = "from")]
        to: Option<String>,

        /// Any, or a weekday name
        #[arg(long, default_value = "Any")]
        day: DayFilter,
    },

    /// Reserve a seat on a flight
    Book {
        #[arg(long)]
        flight: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        citizenship: String,
    },

    /// Search reservations by code, airline and traveler name
    Find {
        #[arg(long, default_value = "")]
        code: String,

        #[arg(long, default_value = "")]
        airline: String,

        #[arg(long, default_value = "")]
        name: String,
    },

    /// Show one reservation by its exact code
    Show { code: String },

    /// Mark a reservation active or inactive
    SetActive {
        code: String,

        #[arg(action = clap::ArgAction::Set)]
        active: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match &cli.config {
        Some(path) => Config::from_json_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => Config::default(),
    };

    let mut system = ReservationSystem::open(&config).context("starting reservation system")?;
    for issue in system.load_issues() {
        eprintln!("warning: skipped reservation record {}: {}", issue.index, issue.error);
    }

    match cli.command {
        Commands::Airports => {
            for airport in system.airports() {
                println!("{}", airport);
            }
        }
        Commands::Flights { from, to, day } => {
            let flights: Vec<_> = match (from.as_deref(), to.as_deref()) {
                (Some(from), Some(to)) => system.find_flights(from, to, day),
                _ => system
                    .flights()
                    .iter()
                    .filter(|f| day.matches(f.weekday))
                    .collect(),
            };
            for flight in flights {
                println!(
                    "{}  [{} seats free]",
                    flight,
                    system.available_seats(flight)
                );
            }
        }
        Commands::Book {
            flight,
            name,
            citizenship,
        } => match system.make_reservation(&flight, &name, &citizenship) {
            Ok(reservation) => println!(
                "Reserved {} on {} for {} ({:.2})",
                reservation,
                reservation.flight_code(),
                reservation.name(),
                reservation.cost()
            ),
            Err(BookingError::NotPersisted {
                reservation,
                source,
            }) => {
                println!("Reserved {} on {}", reservation, reservation.flight_code());
                eprintln!("warning: reservation was not saved: {}", source);
            }
            Err(e) => return Err(e).context("booking failed"),
        },
        Commands::Find {
            code,
            airline,
            name,
        } => {
            let found = system.find_reservations(&code, &airline, &name);
            if found.is_empty() {
                println!("No reservations found");
            }
            for reservation in found {
                println!(
                    "{}  {}  {}  {}  {}  {:.2}  {}",
                    reservation,
                    reservation.flight_code(),
                    reservation.airline(),
                    reservation.name(),
                    reservation.citizenship(),
                    reservation.cost(),
                    if reservation.is_active() { "active" } else { "inactive" }
                );
            }
        }
        Commands::Show { code } => match system.find_reservation_by_code(&code) {
            Some(reservation) => println!(
                "Code: {}\nFlight: {}\nAirline: {}\nName: {}\nCitizenship: {}\nCost: {:.2}\nStatus: {}",
                reservation,
                reservation.flight_code(),
                reservation.airline(),
                reservation.name(),
                reservation.citizenship(),
                reservation.cost(),
                if reservation.is_active() { "Active" } else { "Inactive" }
            ),
            None => anyhow::bail!("no reservation with code {}", code),
        },
        Commands::SetActive { code, active } => {
            if !system.set_reservation_active(&code, active)? {
                anyhow::bail!("no reservation with code {}", code);
            }
            println!("{} is now {}", code, if active { "active" } else { "inactive" });
        }
    }

    Ok(())
}
