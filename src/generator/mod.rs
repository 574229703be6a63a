pub mod header_writer;

pub use header_writer::{HeaderGenerator, VALUE_PRECISION};
