//! Wall-clock driving of the triage pipeline, shared by the `clarity` binary

pub mod driver;

pub use driver::LiveDriver;
