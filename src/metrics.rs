//! Derived metrics over a single [`PriceRecord`].
//!
//! Every view, card and prompt summary classifies records through this module,
//! so there is exactly one rule for "opportunity", "risk" and "stable".

use serde::{Deserialize, Serialize};

use crate::types::{Month, PriceRecord};

/// Band, in percent, inside which a predicted move counts as stable.
pub const SENTIMENT_THRESHOLD_PERC: f64 = 5.0;

/// Months that carry observed prices, most recent first.
const OBSERVED_MONTHS_DESC: [Month; 5] = [Month::May, Month::Apr, Month::Mar, Month::Feb, Month::Jan];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Opportunity,
    Risk,
    Stable,
}

impl Sentiment {
    pub fn from_change(percentage_change: f64) -> Self {
        if percentage_change > SENTIMENT_THRESHOLD_PERC {
            Sentiment::Opportunity
        } else if percentage_change < -SENTIMENT_THRESHOLD_PERC {
            Sentiment::Risk
        } else {
            Sentiment::Stable
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Opportunity => "Opportunity",
            Sentiment::Risk => "Risk",
            Sentiment::Stable => "Stable",
        }
    }

    pub fn recommendation(&self) -> Recommendation {
        match self {
            Sentiment::Opportunity => Recommendation::Buy,
            Sentiment::Risk => Recommendation::Sell,
            Sentiment::Stable => Recommendation::Wait,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Recommendation {
    Buy,
    Sell,
    Wait,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Buy => "BUY",
            Recommendation::Sell => "SELL",
            Recommendation::Wait => "WAIT",
        }
    }
}

/// First non-null observed price scanning backward from May, or 0.
pub fn last_observed_price(record: &PriceRecord) -> f64 {
    OBSERVED_MONTHS_DESC
        .iter()
        .find_map(|month| record.current_price(*month))
        .unwrap_or(0.0)
}

pub fn forecast_june(record: &PriceRecord) -> f64 {
    record.forecast(Month::Jun).unwrap_or(0.0)
}

/// Predicted move from the last observed price to the June forecast, in percent.
/// A record without any observed price yields 0.
pub fn percentage_change(record: &PriceRecord) -> f64 {
    let last = last_observed_price(record);
    if last > 0.0 {
        (forecast_june(record) - last) / last * 100.0
    } else {
        0.0
    }
}

/// Width of the June forecast band. Non-positive values are not plottable.
pub fn volatility(record: &PriceRecord) -> f64 {
    record.forecast_range_june.max - record.forecast_range_june.min
}

pub fn sentiment(record: &PriceRecord) -> Sentiment {
    Sentiment::from_change(percentage_change(record))
}

pub fn recommendation(record: &PriceRecord) -> Recommendation {
    sentiment(record).recommendation()
}

pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecordMetrics {
    pub last_observed_price: f64,
    pub forecast_june: f64,
    pub percentage_change: f64,
    pub volatility: f64,
    pub sentiment: Sentiment,
    pub recommendation: Recommendation,
}

impl RecordMetrics {
    pub fn compute(record: &PriceRecord) -> Self {
        let percentage_change = percentage_change(record);
        let sentiment = Sentiment::from_change(percentage_change);

        Self {
            last_observed_price: last_observed_price(record),
            forecast_june: forecast_june(record),
            percentage_change,
            volatility: volatility(record),
            sentiment,
            recommendation: sentiment.recommendation(),
        }
    }

    pub fn has_valid_volatility(&self) -> bool {
        self.volatility > 0.0
    }
}
