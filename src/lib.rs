//! MCDA Engine - Multi-Criteria Decision Analysis
//!
//! This crate ranks alternatives against several criteria under certainty,
//! under uncertainty (states of nature) and with fuzzy degrees. Expert panels
//! are aggregated into criterion rows, rows are flipped and normalized, and
//! ten optimality principles vote on the winners.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
