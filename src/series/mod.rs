//! Entity time series and their resampling
//!
//! Tracks and truths share one structural shape: an integer-identified
//! entity owning a time-indexed record of scalar fields. This module
//! provides that shape ([`EntitySeries`]), the per-category collection
//! ([`SeriesStore`]) with table ingestion and the observed time axis, and
//! the linear resampling used to make truth commensurable with the track
//! cadence.

pub mod entity;
pub mod interp;
pub mod store;

pub use entity::{EntitySeries, Record};
pub use interp::resample_linear;
pub use store::SeriesStore;
