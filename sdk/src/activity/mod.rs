//! Activity-side API: out-of-process units of work invoked by workflows

pub mod context;
pub mod definition;
