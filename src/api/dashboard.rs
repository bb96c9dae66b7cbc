use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::AppState;
use crate::metrics::RecordMetrics;
use crate::types::{DashboardQuery, FilterQuery, FiltersResponse, RecordWithMetrics};
use crate::views::DashboardView;

pub async fn filters(State(state): State<Arc<AppState>>) -> Json<FiltersResponse> {
    Json(FiltersResponse {
        products: state.repository.products(),
        states: state.repository.states(),
    })
}

/// Filtered records with their derived metrics. No fallback: an unmatched
/// filter returns an empty list.
pub async fn records(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FilterQuery>,
) -> Json<Vec<RecordWithMetrics>> {
    let records = state
        .repository
        .filter(query.product.as_deref(), query.state.as_deref())
        .into_iter()
        .map(|record| RecordWithMetrics {
            metrics: RecordMetrics::compute(&record),
            record,
        })
        .collect();

    Json(records)
}

pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Json<DashboardView> {
    Json(DashboardView::build(
        state.repository.as_ref(),
        query.product.as_deref(),
        query.state.as_deref(),
        query.theme,
    ))
}
