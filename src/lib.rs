//! **stepmaze** is a stepwise maze carving and shortest-path solving library.
//!
//! Both the carving and the solving algorithm are exposed as resumable
//! iterators over discrete step events, so an external driver can advance
//! one algorithm step per rendering tick.

pub mod cells;
pub mod errors;
pub mod generators;
pub mod maze;
pub mod pathing;
pub mod units;
mod utils;
