pub mod classification;
pub mod stats;
