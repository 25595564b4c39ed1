//! Auralis: browser front end for audio incident analysis.
//!
//! Audio clips are uploaded to an analysis backend and the results can be
//! kept in a bounded history in browser storage, shown on the Dashboard.

pub mod api;
pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod history;
pub mod pages;
pub mod storage;
