//! optflow: a demo options-flow analytics stack.
//!
//! Synthesizes one session of mock options data from a seed, computes derived
//! views (minute flow, KPIs, unusual-activity scores, gamma exposure), routes
//! free-text questions to those views through a deterministic chat core, and
//! serves a small mock metric API.

pub mod analytics;
pub mod api;
pub mod chat;
pub mod cli;
pub mod export;
pub mod metrics;
pub mod mock;
pub mod model;
pub mod viz;
