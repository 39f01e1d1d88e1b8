//! Shared helpers for integration tests.
#![allow(dead_code)]

pub mod osrm_dataset;
pub mod stub_backend;
