//! Dashboard widgets as serializable view models.
//!
//! Every builder here is a pure function of records plus display flags; the
//! frontend only draws what it receives.

pub mod cards;
pub mod charts;

pub use cards::{ExecutiveSummary, RecommendationCard, SummaryStats, Trend};
pub use charts::{PriceChart, RiskReturnChart, SentimentChart, StatePerformanceChart};

use serde::{Deserialize, Serialize};

use crate::data::PriceRepository;
use crate::metrics::Sentiment;
use crate::types::PriceRecord;

/// Records shown when a filter matches nothing.
pub const FALLBACK_VIEW_SIZE: usize = 5;
pub const MAX_RECOMMENDATIONS: usize = 6;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Palette {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub positive: &'static str,
    pub warning: &'static str,
    pub neutral: &'static str,
}

impl Palette {
    pub fn sentiment(&self, sentiment: Sentiment) -> &'static str {
        match sentiment {
            Sentiment::Opportunity => self.positive,
            Sentiment::Risk => self.warning,
            Sentiment::Stable => self.neutral,
        }
    }
}

impl Theme {
    pub fn palette(&self) -> Palette {
        match self {
            Theme::Light => Palette {
                primary: "#16a34a",
                secondary: "#22c55e",
                positive: "#10B981",
                warning: "#F59E0B",
                neutral: "#3B82F6",
            },
            Theme::Dark => Palette {
                primary: "#4ade80",
                secondary: "#86efac",
                positive: "#34D399",
                warning: "#FBBF24",
                neutral: "#60A5FA",
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub theme: Theme,
    pub palette: Palette,
    pub products: Vec<String>,
    pub states: Vec<String>,
    pub stats: SummaryStats,
    pub executive_summary: ExecutiveSummary,
    pub price_chart: Option<PriceChart>,
    pub risk_return: RiskReturnChart,
    pub sentiment: SentimentChart,
    pub state_performance: StatePerformanceChart,
    pub recommendations: Vec<RecommendationCard>,
}

/// The filtered records, or the first few records when the filter matches nothing.
pub fn display_records(
    repo: &dyn PriceRepository,
    product: Option<&str>,
    state: Option<&str>,
) -> Vec<PriceRecord> {
    let filtered = repo.filter(product, state);
    if filtered.is_empty() {
        repo.all().iter().take(FALLBACK_VIEW_SIZE).cloned().collect()
    } else {
        filtered
    }
}

impl DashboardView {
    pub fn build(
        repo: &dyn PriceRepository,
        product: Option<&str>,
        state: Option<&str>,
        theme: Theme,
    ) -> Self {
        let palette = theme.palette();
        let records = display_records(repo, product, state);
        let states = repo.states();
        let state_selected = state.is_some_and(|s| !s.is_empty());

        Self {
            theme,
            palette,
            products: repo.products(),
            stats: cards::summary_stats(&records, state_selected, states.len()),
            states,
            executive_summary: cards::executive_summary(&records),
            price_chart: records.first().map(|r| charts::price_chart(r, &palette)),
            risk_return: charts::risk_return_chart(&records, &palette),
            sentiment: charts::sentiment_chart(&records, &palette),
            state_performance: charts::state_performance_chart(&records, &palette),
            recommendations: records
                .iter()
                .take(MAX_RECOMMENDATIONS)
                .map(|r| cards::recommendation_card(r, &palette))
                .collect(),
        }
    }
}
