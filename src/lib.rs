//! Wellness Profile - profile dashboard aggregation and speech uploads
//!
//! Aggregates seven independently failable profile resources into one
//! view-model per cycle, and accepts audio uploads bound for an external
//! speech-to-text provider.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
