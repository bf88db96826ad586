//! Fare and Earnings Engine for taxi drivers
//!
//! This crate provides the calculation core of a taxi driver's income/expense
//! tracker: a regulated-tariff fare calculator and a period-based earnings
//! aggregator with commission-adjusted income.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
