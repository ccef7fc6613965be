//! node-forest-util - helpers shared by the node-forest tests and self-test.

pub mod fuzzer;

pub use fuzzer::Fuzzer;
