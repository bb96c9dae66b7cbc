use serde::Serialize;

use crate::format;
use crate::metrics::{self, RecordMetrics, Sentiment};
use crate::types::{Month, PriceRecord};
use crate::views::Palette;

#[derive(Debug, Serialize)]
pub struct PricePoint {
    pub month: &'static str,
    pub current: Option<f64>,
    pub forecast: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct PriceChart {
    pub title: String,
    pub points: Vec<PricePoint>,
    pub current_color: &'static str,
    pub forecast_color: &'static str,
}

/// Observed vs. forecast line for one record. June is forecast-only.
pub fn price_chart(record: &PriceRecord, palette: &Palette) -> PriceChart {
    let points = Month::ALL
        .iter()
        .map(|month| PricePoint {
            month: month.label(),
            current: match month {
                Month::Jun => None,
                _ => record.current_price(*month),
            },
            forecast: record.forecast(*month),
        })
        .collect();

    PriceChart {
        title: format!("{} - {}", record.product, record.state),
        points,
        current_color: palette.primary,
        forecast_color: palette.secondary,
    }
}

#[derive(Debug, Serialize)]
pub struct RiskReturnPoint {
    pub name: String,
    pub risk: f64,
    #[serde(rename = "return")]
    pub return_perc: f64,
    pub risk_label: String,
    pub return_label: String,
}

#[derive(Debug, Serialize)]
pub struct RiskReturnChart {
    pub points: Vec<RiskReturnPoint>,
    pub color: &'static str,
}

/// Forecast band width against predicted return. Records without a usable
/// band or without an observed price are left out.
pub fn risk_return_chart(records: &[PriceRecord], palette: &Palette) -> RiskReturnChart {
    let points = records
        .iter()
        .filter_map(|record| {
            let m = RecordMetrics::compute(record);
            if !m.has_valid_volatility() || m.percentage_change == 0.0 {
                return None;
            }
            Some(RiskReturnPoint {
                name: record.label(),
                risk: m.volatility,
                return_perc: m.percentage_change,
                risk_label: format::amount(m.volatility),
                return_label: format::percent(m.percentage_change),
            })
        })
        .collect();

    RiskReturnChart {
        points,
        color: palette.positive,
    }
}

#[derive(Debug, Serialize)]
pub struct SentimentSlice {
    pub sentiment: Sentiment,
    pub name: &'static str,
    pub count: usize,
    pub color: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SentimentChart {
    pub slices: Vec<SentimentSlice>,
}

pub fn sentiment_chart(records: &[PriceRecord], palette: &Palette) -> SentimentChart {
    let slices = [Sentiment::Opportunity, Sentiment::Risk, Sentiment::Stable]
        .into_iter()
        .map(|sentiment| SentimentSlice {
            sentiment,
            name: sentiment.label(),
            count: records
                .iter()
                .filter(|r| metrics::sentiment(r) == sentiment)
                .count(),
            color: palette.sentiment(sentiment),
        })
        .filter(|slice| slice.count > 0)
        .collect();

    SentimentChart { slices }
}

#[derive(Debug, Serialize)]
pub struct StateBar {
    pub state: String,
    pub change: f64,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct StatePerformanceChart {
    pub bars: Vec<StateBar>,
    pub color: &'static str,
}

/// Predicted June change per record, highest first.
pub fn state_performance_chart(records: &[PriceRecord], palette: &Palette) -> StatePerformanceChart {
    let mut bars: Vec<StateBar> = records
        .iter()
        .map(|record| {
            let change = metrics::percentage_change(record);
            StateBar {
                state: record.state.clone(),
                change,
                label: format::percent(change),
            }
        })
        .collect();

    bars.sort_by(|a, b| b.change.total_cmp(&a.change));

    StatePerformanceChart {
        bars,
        color: palette.neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::record;
    use crate::views::Theme;

    #[test]
    fn price_chart_has_six_months_and_no_june_observation() {
        let r = record("SOJA", "MT", [Some(45.16), Some(50.48), None, Some(54.86), Some(57.51)], 57.04, (53.86, 60.22));
        let chart = price_chart(&r, &Theme::Light.palette());

        assert_eq!(chart.title, "SOJA - MT");
        assert_eq!(chart.points.len(), 6);
        assert_eq!(chart.points[2].current, None);
        assert_eq!(chart.points[4].current, Some(57.51));
        assert_eq!(chart.points[5].month, "Jun");
        assert_eq!(chart.points[5].current, None);
        assert_eq!(chart.points[5].forecast, Some(57.04));
    }

    #[test]
    fn risk_return_excludes_degenerate_records() {
        let records = vec![
            record("A", "PR", [None, None, None, None, Some(10.0)], 12.0, (11.0, 13.0)),
            record("B", "SP", [None, None, None, None, Some(10.0)], 12.0, (12.0, 12.0)),
            record("C", "MG", [None; 5], 12.0, (11.0, 13.0)),
        ];
        let chart = risk_return_chart(&records, &Theme::Light.palette());

        assert_eq!(chart.points.len(), 1);
        let point = &chart.points[0];
        assert_eq!(point.name, "A (PR)");
        assert_eq!(point.risk_label, "$ 2.00");
        assert_eq!(point.return_label, "20.0%");
    }

    #[test]
    fn sentiment_chart_omits_empty_slices() {
        let records = vec![
            record("A", "PR", [None, None, None, None, Some(10.0)], 12.0, (11.0, 13.0)),
            record("B", "SP", [None, None, None, None, Some(10.0)], 10.2, (9.0, 11.0)),
            record("C", "MG", [None; 5], 12.0, (11.0, 13.0)),
        ];
        let chart = sentiment_chart(&records, &Theme::Light.palette());

        let names: Vec<_> = chart.slices.iter().map(|s| (s.name, s.count)).collect();
        assert_eq!(names, vec![("Opportunity", 1), ("Stable", 2)]);
    }

    #[test]
    fn state_performance_sorted_descending() {
        let records = vec![
            record("A", "PR", [None, None, None, None, Some(10.0)], 9.0, (8.0, 10.0)),
            record("B", "SP", [None, None, None, None, Some(10.0)], 12.0, (11.0, 13.0)),
            record("C", "MG", [None, None, None, None, Some(10.0)], 10.5, (10.0, 11.0)),
        ];
        let chart = state_performance_chart(&records, &Theme::Dark.palette());

        let states: Vec<_> = chart.bars.iter().map(|b| b.state.as_str()).collect();
        assert_eq!(states, vec!["SP", "MG", "PR"]);
        assert_eq!(chart.bars[0].label, "20.0%");
        assert_eq!(chart.bars[2].label, "-10.0%");
    }
}
