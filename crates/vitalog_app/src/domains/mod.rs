//! Pure domain logic: derived indicators, the daily record model, and
//! trend windowing. Nothing here performs I/O.

pub mod metrics;
pub mod record;
pub mod trends;
