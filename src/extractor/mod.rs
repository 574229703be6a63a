pub mod dt_extractor;

pub use dt_extractor::{DtExtractor, Extraction, DEFAULT_MARKER};
