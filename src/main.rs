use clap::Parser;
use fare_graph::{FlightSearch, SearchParameters, SessionConfig, TicketType};

mod args;
use args::{Args, convert_ticket_type};

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let ticket_type = convert_ticket_type(args.ticket_type);
    if ticket_type == TicketType::RoundTrip && args.return_date.is_none() {
        ::log::error!("a round-trip search needs --return-date");
        std::process::exit(2);
    }

    let params = SearchParameters {
        departure: args.departure,
        destination: args.destination,
        departure_date: args.departure_date,
        return_date: args.return_date,
        ticket_type,
    };

    let mut config = match &args.config_file {
        Some(path) => match SessionConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                ::log::error!("could not load {}: {}", path, e);
                std::process::exit(2);
            }
        },
        None => SessionConfig::default(),
    };
    if let Some(output_dir) = args.output_dir {
        config.output_dir = output_dir;
    }
    if let Some(webdriver_url) = args.webdriver_url {
        config.webdriver_url = webdriver_url;
    }
    if let Some(attempts) = args.attempts {
        config.max_attempts = attempts;
    }

    ::log::info!(
        "searching {} -> {} departing {}",
        params.departure,
        params.destination,
        params.departure_date
    );
    println!("Note: extraction requires a running WebDriver server (e.g. chromedriver).");
    println!(
        "Set WEBDRIVER_URL if not using the configured {}",
        config.webdriver_url
    );

    let search = FlightSearch::new(params)
        .with_config(config)
        .with_flight_list(args.flights)
        .with_dedup(args.dedup);

    match search.run().await {
        Ok(outcome) => {
            println!(
                "Collected {} price points -> {}",
                outcome.series.len(),
                outcome.history_path.display()
            );
            if let (Some(flights), Some(path)) = (&outcome.flights, &outcome.flights_path) {
                println!("Collected {} flight rows -> {}", flights.len(), path.display());
            }
        }
        Err(e) => {
            ::log::error!("extraction failed: {}", e);
            std::process::exit(1);
        }
    }
}
