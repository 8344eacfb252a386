use fare_graph::{FlightSearch, SearchParameters};

#[tokio::main]
async fn main() {
    // Initialize logger
    env_logger::init();

    // A one-way search, written with the builder API. Requires a WebDriver
    // server (e.g. chromedriver) listening on the default endpoint or the
    // one named in WEBDRIVER_URL.
    let params = SearchParameters::one_way("MIA", "SEA", "2025-03-01");

    let outcome = FlightSearch::new(params)
        .with_output_dir("flight_results")
        .with_dedup(true)
        .run()
        .await;

    match outcome {
        Ok(outcome) => println!(
            "Collected {} price points -> {}",
            outcome.series.len(),
            outcome.history_path.display()
        ),
        Err(e) => eprintln!("Extraction failed: {}", e),
    }
}
