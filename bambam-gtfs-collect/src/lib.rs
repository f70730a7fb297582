//! periodic collection of static and real-time GTFS files.
//!
//! a [`collection::TransitSource`] downloads the files of one transit agency that
//! changed since the previous download, protected by a [`gate::CallGate`]. the
//! changed files are then written below a data root by a
//! [`persistence::PersistenceRouter`], bucketed by ISO week.
pub mod app;
pub mod collection;
pub mod gate;
pub mod persistence;
pub mod util;
