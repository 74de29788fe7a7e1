//! Core library for the workout-tools command line application.
//!
//! The library turns a personal workout log kept in a spreadsheet into the
//! derived views a training dashboard shows. Responsibilities stay narrow:
//! spreadsheet adapters live under [`workout::tools::io`], the fetch capability
//! and its cache in [`workout::tools::source`], typed records in
//! [`workout::tools::model`], and one module per derived view
//! ([`workout::tools::daily`], [`workout::tools::personal_record`],
//! [`workout::tools::volume`]). [`workout::tools::chart`] shapes the derived
//! series for a chart renderer.

pub mod workout;

pub use workout::tools::{
    Result, ToolError, chart, config, daily, error, io, model, partition, personal_record,
    source, volume,
};
