//! Transit trip planner.
//!
//! Finds the cheapest path between two stops of a bus and rail network,
//! where cost is physical distance plus a fixed penalty for every change
//! of line, and breaks the result into rides per line.

pub mod domain;
pub mod network;
pub mod planner;
