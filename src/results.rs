use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Sentinel text recorded when a label region renders without content.
pub const UNAVAILABLE: &str = "N/A";

static AMOUNT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d[\d,]*(?:\.\d+)?)").expect("amount pattern is valid"));

/// One observation read from the price graph: the date and price text
/// exactly as the widget rendered them (the price keeps its currency
/// prefix, the date is not normalized).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: String,
    pub price: String,
}

impl PricePoint {
    pub fn new(date: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            price: price.into(),
        }
    }

    /// True when either field carries the unavailable sentinel.
    pub fn is_unavailable(&self) -> bool {
        self.date == UNAVAILABLE || self.price == UNAVAILABLE
    }

    /// Numeric amount parsed out of the rendered price text, if any.
    pub fn amount(&self) -> Option<f64> {
        let captures = AMOUNT_RE.captures(&self.price)?;
        captures.get(1)?.as_str().replace(',', "").parse().ok()
    }
}

/// Ordered, append-only sequence of price points. Insertion order is
/// discovery order across graph pages; adjacent pages overlap, so the same
/// date can appear more than once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, point: PricePoint) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PricePoint> {
        self.points.iter()
    }

    /// Explicit post-processing stage that drops duplicate observations,
    /// keyed on the full `(date, price)` pair. The first occurrence wins
    /// and the remaining points keep their discovery order. The paginator
    /// never applies this itself.
    pub fn deduped(&self) -> PriceSeries {
        let mut seen = std::collections::HashSet::new();
        let points = self
            .points
            .iter()
            .filter(|p| seen.insert((p.date.clone(), p.price.clone())))
            .cloned()
            .collect();
        PriceSeries { points }
    }
}

impl From<Vec<PricePoint>> for PriceSeries {
    fn from(points: Vec<PricePoint>) -> Self {
        Self { points }
    }
}

impl IntoIterator for PriceSeries {
    type Item = PricePoint;
    type IntoIter = std::vec::IntoIter<PricePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_parsing() {
        assert_eq!(PricePoint::new("Mar 5", "$123").amount(), Some(123.0));
        assert_eq!(PricePoint::new("Mar 5", "$1,234").amount(), Some(1234.0));
        assert_eq!(PricePoint::new("Mar 5", "€99.50").amount(), Some(99.5));
        assert_eq!(PricePoint::new("Mar 5", UNAVAILABLE).amount(), None);
    }

    #[test]
    fn test_unavailable_sentinel() {
        assert!(PricePoint::new(UNAVAILABLE, "$12").is_unavailable());
        assert!(PricePoint::new("Mar 5", UNAVAILABLE).is_unavailable());
        assert!(!PricePoint::new("Mar 5", "$12").is_unavailable());
    }

    #[test]
    fn test_dedup_keeps_first_occurrence_in_order() {
        let mut series = PriceSeries::new();
        series.push(PricePoint::new("Mar 5", "$120"));
        series.push(PricePoint::new("Mar 6", "$130"));
        series.push(PricePoint::new("Mar 5", "$120"));
        series.push(PricePoint::new("Mar 5", "$125"));
        series.push(PricePoint::new("Mar 6", "$130"));

        let deduped = series.deduped();
        assert_eq!(
            deduped.points(),
            &[
                PricePoint::new("Mar 5", "$120"),
                PricePoint::new("Mar 6", "$130"),
                PricePoint::new("Mar 5", "$125"),
            ]
        );
        // The original series is untouched.
        assert_eq!(series.len(), 5);
    }
}
