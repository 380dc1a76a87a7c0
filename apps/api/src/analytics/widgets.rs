//! Dashboard widget descriptions for the analytics view.
//!
//! The UI layer draws these as-is; values are pre-formatted so every client
//! shows the same rounding.

use serde::Serialize;

use crate::analytics::metrics::DerivedMetrics;

const GAUGE_BAR_COLOR: &str = "#336699";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCard {
    pub title: &'static str,
    pub value: f64,
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeWidget {
    pub title: &'static str,
    pub value: f64,
    pub range_min: f64,
    pub range_max: f64,
    pub bar_color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub cards: Vec<MetricCard>,
    pub gauge: GaugeWidget,
}

pub fn build_dashboard(metrics: &DerivedMetrics) -> DashboardView {
    let percent_card = |title: &'static str, value: f64| MetricCard {
        title,
        value,
        display: format!("{value:.2}%"),
    };

    DashboardView {
        cards: vec![
            percent_card("Revenue Growth", metrics.revenue_growth),
            percent_card("Profit Margin", metrics.profit_margin),
            percent_card("ROI", metrics.roi),
        ],
        gauge: GaugeWidget {
            title: "Profit Margin",
            value: metrics.profit_margin,
            range_min: 0.0,
            range_max: 100.0,
            bar_color: GAUGE_BAR_COLOR,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::metrics::{evaluate, sample_input};

    #[test]
    fn test_cards_are_formatted_to_two_decimals() {
        let metrics = evaluate(&sample_input()).unwrap();
        let view = build_dashboard(&metrics);
        let displays: Vec<&str> = view.cards.iter().map(|c| c.display.as_str()).collect();
        assert_eq!(displays, vec!["20.00%", "25.00%", "50.00%"]);
    }

    #[test]
    fn test_gauge_tracks_profit_margin() {
        let metrics = evaluate(&sample_input()).unwrap();
        let view = build_dashboard(&metrics);
        assert_eq!(view.gauge.value, metrics.profit_margin);
        assert_eq!(view.gauge.range_max, 100.0);
        assert_eq!(view.gauge.bar_color, "#336699");
    }
}
