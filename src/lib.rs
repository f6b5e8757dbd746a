pub mod analysis;
pub mod api;
pub mod config;
pub mod display;
pub mod error;
pub mod insight;
pub mod prompt;
pub mod review;
pub mod source;
