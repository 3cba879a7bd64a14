// Common test utilities
#![allow(dead_code)]

pub mod fixtures;
pub mod harness;
pub mod stub_server;

pub use fixtures::*;
pub use harness::*;
pub use stub_server::*;
