use serde::Serialize;

use crate::metrics::{self, round_to};
use crate::types::PriceRecord;

/// Records beyond this many are left out of the report prompt.
pub const MAX_PROMPT_RECORDS: usize = 15;

#[derive(Debug, Serialize)]
pub struct ForecastSummary {
    pub product: String,
    pub predicted_change_perc: f64,
    pub model_accuracy_perc: f64,
    pub forecast_volatility_brl: f64,
}

pub fn summarize(records: &[PriceRecord]) -> Vec<ForecastSummary> {
    records
        .iter()
        .take(MAX_PROMPT_RECORDS)
        .map(|r| ForecastSummary {
            product: r.label(),
            predicted_change_perc: round_to(metrics::percentage_change(r), 1),
            model_accuracy_perc: r.model_accuracy_percent,
            forecast_volatility_brl: round_to(metrics::volatility(r), 2),
        })
        .collect()
}

pub fn build_market_report_prompt(records: &[PriceRecord]) -> String {
    let summary = serde_json::to_string_pretty(&summarize(records))
        .unwrap_or_else(|_| "[]".to_string());

    format!(
        r#"**PERSONA:** You are a senior financial consultant and market analyst specializing in agricultural commodities for the Brazilian market. Your language is professional, direct, and focused on actionable insights.

**TASK:** Analyze the summary of agricultural price forecast data below. Based exclusively on this data, write a consulting report for a client (investor or producer).

**DATA FOR ANALYSIS:**
{}

**MANDATORY REPORT STRUCTURE (use this format):**

### Agricultural Market Analysis Report

**1. Sentiment Analysis:**
Describe the overall market sentiment (optimistic, pessimistic, or mixed) based on the proportion of products with a predicted rise versus a fall in the provided data. Justify your analysis.

**2. Key Opportunities:**
List the 2 or 3 best investment opportunities (highest positive variations). For each, comment on the balance between the expected return (predicted_change_perc) and the confidence in the forecast (model_accuracy_perc and forecast_volatility_brl). High accuracy and low volatility make an opportunity more solid.

**3. Points of Concern and Risks:**
List the 2 or 3 biggest risks (most negative variations). For each, besides citing the drop, comment on the volatility. If volatility is high, the risk is even greater. Suggest an action for each point (e.g., "Monitor closely," "Consider early selling," "Avoid exposure").

**4. Investment Thesis (Strategic Recommendation):**
Conclude with a clear and actionable final recommendation, in 2-3 sentences, as a consultant would for a client.

Use Markdown to format the report."#,
        summary
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::record;

    #[test]
    fn summary_is_capped_and_rounded() {
        let records: Vec<_> = (0..20)
            .map(|_| record("MILHO", "RS", [None, None, None, None, Some(57.51)], 64.23, (59.32, 69.15)))
            .collect();

        let summary = summarize(&records);
        assert_eq!(summary.len(), MAX_PROMPT_RECORDS);
        assert_eq!(summary[0].product, "MILHO (RS)");
        assert_eq!(summary[0].predicted_change_perc, 11.7);
        assert_eq!(summary[0].forecast_volatility_brl, 9.83);
    }

    #[test]
    fn prompt_embeds_data_and_all_sections() {
        let records = vec![record("SOJA", "MT", [None; 5], 57.04, (53.86, 60.22))];
        let prompt = build_market_report_prompt(&records);

        assert!(prompt.contains("\"product\": \"SOJA (MT)\""));
        assert!(prompt.contains("\"predicted_change_perc\": 0.0"));
        for section in [
            "1. Sentiment Analysis",
            "2. Key Opportunities",
            "3. Points of Concern and Risks",
            "4. Investment Thesis",
        ] {
            assert!(prompt.contains(section), "missing {}", section);
        }
    }
}
