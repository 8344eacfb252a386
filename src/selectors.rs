//! CSS selectors for the flight-search page and its price graph.
//!
//! These are tied to the current markup of the target page; the rest of the
//! crate only ever refers to them through this module.

// Search form
pub const TICKET_TYPE_DROPDOWN: &str = "div.VfPpkd-TkwUic[jsname='oYxtQd']";
pub const TICKET_TYPE_MENU: &str = "ul[aria-label='Select your ticket type.']";
pub const TICKET_TYPE_OPTION: &str = "ul[aria-label='Select your ticket type.'] li";
pub const FROM_INPUT: &str = "input[aria-label='Where from?']";

// Results list
pub const RESULT_ROW: &str = "li.pIav2d";
pub const MORE_FLIGHTS: &str = "button[aria-label*='more flights']";

// Flight row fields
pub const AIRLINE: &str = "div.sSHqwe.tPgKwe.ogfYpf";
pub const DEPARTURE_TIME: &str = "span[aria-label^='Departure time']";
pub const ARRIVAL_TIME: &str = "span[aria-label^='Arrival time']";
pub const DURATION: &str = "div[aria-label^='Total duration']";
pub const STOPS: &str = "div.hF6lYb span.rGRiKd";
pub const PRICE: &str = "div.FpEdX span";
pub const CO2_EMISSIONS: &str = "div.O7CXue";
pub const EMISSIONS_VARIATION: &str = "div.N6PNV";

// Price graph
pub const GRAPH_TOGGLE: &str = "button[jsname='MinD4b']";
pub const GRAPH_POINT: &str = "g.ZMv3u-JNdkSc";
pub const GRAPH_LABEL_DATE: &str = "div.hDLiAd";
pub const GRAPH_LABEL_PRICE: &str = "div.J4Pmnb span";
pub const SCROLL_FORWARD: &str = "button[aria-label='Scroll forward']";
pub const SCROLL_BACKWARD: &str = "button[aria-label='Scroll backward']";
