use serde::{Deserialize, Serialize};

/// The kind of ticket the search form is asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketType {
    #[default]
    OneWay,
    RoundTrip,
}

impl TicketType {
    /// The entry text the ticket-type menu renders for this kind.
    pub fn menu_label(&self) -> &'static str {
        match self {
            TicketType::OneWay => "One way",
            TicketType::RoundTrip => "Round trip",
        }
    }
}

/// Parameters of one flight search, created once per run and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchParameters {
    /// Departure location token (e.g. an airport code)
    pub departure: String,

    /// Destination location token
    pub destination: String,

    /// Departure date exactly as typed into the search form
    pub departure_date: String,

    /// Return date, only meaningful for round-trip searches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_date: Option<String>,

    #[serde(default)]
    pub ticket_type: TicketType,
}

impl SearchParameters {
    /// Create parameters for a one-way search
    pub fn one_way(
        departure: impl Into<String>,
        destination: impl Into<String>,
        departure_date: impl Into<String>,
    ) -> Self {
        Self {
            departure: departure.into(),
            destination: destination.into(),
            departure_date: departure_date.into(),
            return_date: None,
            ticket_type: TicketType::OneWay,
        }
    }

    /// Create parameters for a round-trip search
    pub fn round_trip(
        departure: impl Into<String>,
        destination: impl Into<String>,
        departure_date: impl Into<String>,
        return_date: impl Into<String>,
    ) -> Self {
        Self {
            departure: departure.into(),
            destination: destination.into(),
            departure_date: departure_date.into(),
            return_date: Some(return_date.into()),
            ticket_type: TicketType::RoundTrip,
        }
    }
}
