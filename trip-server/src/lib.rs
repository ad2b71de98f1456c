//! Trip planner server.
//!
//! A web application that answers: "Of the ways I could make this trip,
//! which suits me best?" A planning agent proposes candidate trips; this
//! crate scores and ranks them against the user's preference weights.

pub mod agent;
pub mod cache;
pub mod config;
pub mod domain;
pub mod format;
pub mod scoring;
pub mod web;
