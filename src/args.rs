use clap::{Parser, ValueEnum};
use fare_graph::TicketType;

#[derive(Parser, Debug)]
#[command(name = "fare-graph")]
#[command(about = "Extracts the price-history graph for a flight search")]
#[command(version)]
pub struct Args {
    /// Departure location token (e.g. an airport code)
    pub departure: String,

    /// Destination location token
    pub destination: String,

    /// Departure date exactly as typed into the search form (e.g. 2025-03-01)
    #[arg(short = 'd', long)]
    pub departure_date: String,

    /// Return date, required for round-trip searches
    #[arg(short = 'r', long)]
    pub return_date: Option<String>,

    /// Ticket type
    #[arg(short, long, value_enum, default_value_t = TicketTypeArg::OneWay)]
    pub ticket_type: TicketTypeArg,

    /// Directory result files are written to
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// WebDriver endpoint (default http://localhost:4444)
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Attempts for the whole session before giving up
    #[arg(long)]
    pub attempts: Option<u32>,

    /// Also capture the flight result rows
    #[arg(long)]
    pub flights: bool,

    /// Drop duplicate points produced by overlapping graph pages
    #[arg(long)]
    pub dedup: bool,

    /// Path to a JSON session configuration file
    #[arg(long)]
    pub config_file: Option<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum TicketTypeArg {
    OneWay,
    RoundTrip,
}

/// Convert from the CLI ticket type to the library ticket type
pub fn convert_ticket_type(arg: TicketTypeArg) -> TicketType {
    match arg {
        TicketTypeArg::OneWay => TicketType::OneWay,
        TicketTypeArg::RoundTrip => TicketType::RoundTrip,
    }
}
