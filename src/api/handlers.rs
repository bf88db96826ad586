//! HTTP request handlers for the Fare and Earnings Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::collections::BTreeSet;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Local;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    aggregate, calculate_fare, calculate_progress, parse_surcharges, resolve_period_or_fallback,
    select_tariff_tier_with_holidays,
};
use crate::models::Surcharge;

use super::request::{AggregateRequest, FareRequest};
use super::response::{AggregateResponse, ApiError, ApiErrorResponse, FareResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/fare", post(fare_handler))
        .route("/aggregate", post(aggregate_handler))
        .with_state(state)
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Turns a JSON extraction failure into a 400 response.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

/// Handler for POST /fare endpoint.
///
/// Prices a ride with the explicit tier, or the tier in force at `at`
/// (the server's local clock when absent).
async fn fare_handler(
    State(state): State<AppState>,
    payload: Result<Json<FareRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing fare request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let tier = match request.tier {
        Some(tier) => tier,
        None => {
            let at = request.at.unwrap_or_else(|| Local::now().naive_local());
            select_tariff_tier_with_holidays(at, &request.holidays)
        }
    };
    let surcharges: BTreeSet<Surcharge> = parse_surcharges(&request.surcharges);

    let result = calculate_fare(
        request.minutes,
        request.kilometers,
        request.has_booking,
        &surcharges,
        tier,
        state.config().config(),
    );

    info!(
        correlation_id = %correlation_id,
        tier = %tier,
        total = %result.quote.total,
        "Fare calculated"
    );

    json_response(
        StatusCode::OK,
        FareResponse {
            quote: result.quote,
            audit_step: result.audit_step,
        },
    )
}

/// Handler for POST /aggregate endpoint.
///
/// Aggregates the supplied records over the requested period. An unusable
/// custom range falls back to the current month and the response carries
/// the warning.
async fn aggregate_handler(
    State(state): State<AppState>,
    payload: Result<Json<AggregateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing aggregate request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let today = request
        .today
        .unwrap_or_else(|| Local::now().date_naive());
    let (period, fallback_warning) =
        resolve_period_or_fallback(request.period.kind, request.period.range(), today);
    if let Some(warning) = &fallback_warning {
        warn!(
            correlation_id = %correlation_id,
            message = %warning.message,
            "Reporting period replaced"
        );
    }

    let start_time = Instant::now();
    let config = state.config();
    match aggregate(
        &request.trips,
        &request.expenses,
        &period,
        config.commission_table(),
    ) {
        Ok(mut result) => {
            if let Some(warning) = fallback_warning {
                result.warnings.insert(0, warning);
            }
            let progress = request
                .goals
                .as_ref()
                .map(|goals| calculate_progress(&result, goals));

            info!(
                correlation_id = %correlation_id,
                trips_count = request.trips.len(),
                expenses_count = request.expenses.len(),
                net_income = %result.totals.net_income,
                warnings = result.warnings.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Aggregation completed successfully"
            );

            json_response(StatusCode::OK, AggregateResponse { result, progress })
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Aggregation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            json_response(api_error.status, api_error.error)
        }
    }
}
