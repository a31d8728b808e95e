#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod stats;
pub mod syllables;
pub mod time;

pub use error::Error;
pub use time::Clock;
