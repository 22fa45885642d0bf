//! netroute CLI library.
//!
//! This crate provides the rendering side of the `netroute-cli` binary:
//! terminal styling and the text/JSON formatters for route plans and
//! topology reports.

pub mod output;
pub mod terminal;
