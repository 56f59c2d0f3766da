//! Core library for the `wxrss` CLI.
//!
//! This crate defines:
//! - Configuration handling
//! - Feed retrieval and on-disk caching
//! - The extraction engine turning feed items into weather records
//!
//! It is used by `wxrss-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod extract;
pub mod model;
pub mod source;

pub use config::Config;
pub use error::{FeedError, FeedResult};
pub use extract::{Extractor, Field};
pub use model::{FeedStatus, WeatherRecord};
pub use source::{FeedSource, HttpClient, ReqwestHttp};
