//! Presentation layer for Tempo
//!
//! Owns the forecast controller and the two interchangeable terminal
//! views. Views only ever talk to the controller's accessors; nothing
//! here touches the network directly.

pub mod controller;
pub mod views;

pub use controller::{ForecastController, ProcessedForecast};
