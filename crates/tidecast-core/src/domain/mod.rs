mod frequency;
mod timestamp;

pub use frequency::Frequency;
pub use timestamp::{Timestamp, TimestampParseError};
