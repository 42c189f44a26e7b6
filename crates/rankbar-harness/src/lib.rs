#![forbid(unsafe_code)]

//! Support code for the rankbar reference harness: datasets and input
//! scripts.

pub mod dataset;
pub mod script;
