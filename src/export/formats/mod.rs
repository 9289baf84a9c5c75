pub mod profile;
pub mod quality;
pub mod stats;
