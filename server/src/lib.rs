//! Figures reporting API server
//!
//! Serves filtered course, user and site metrics listings over HTTP. The
//! filter resolver lives in [`data::filters`].

pub mod api;
pub mod app;
pub mod core;
pub mod data;
pub mod utils;
