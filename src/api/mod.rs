//! HTTP API module for the Fare and Earnings Engine.
//!
//! This module provides the REST endpoints for pricing a ride and for
//! aggregating a driver's trips and expenses over a reporting period.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AggregateRequest, FareRequest, PeriodRequest};
pub use response::{AggregateResponse, ApiError, FareResponse};
pub use state::AppState;
