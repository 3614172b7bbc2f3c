//! Island-model search: one population per worker thread.
//!
//! Workers never share memory. Each owns its [`Population`](crate::ga::Population)
//! and talks to the [`Coordinator`] over four point-to-point channels:
//!
//! | channel | writer | reader | purpose |
//! |---|---|---|---|
//! | report | worker | coordinator | newly found local best |
//! | improvement | coordinator | worker | global best found elsewhere |
//! | stop | coordinator | worker | shutdown request |
//! | ack | worker | coordinator | shutdown acknowledgement |
//!
//! # Key Types
//!
//! - [`SearchConfig`]: Worker count, stopping rules, channel sizing
//! - [`Coordinator`]: Runs the search
//! - [`SearchResult`]: Best tour, timing, and per-worker statistics

mod config;
mod coordinator;
mod worker;

pub use config::SearchConfig;
pub use coordinator::{solve, Coordinator, SearchResult, Termination};
pub use worker::WorkerStats;
