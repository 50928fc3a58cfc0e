#![allow(clippy::collapsible_if, clippy::manual_range_contains)]
pub mod classify;
pub mod config;
pub mod duration;
pub mod error;
pub mod fetch;
pub mod html;
pub mod resolver;
pub mod strategy;
pub mod title;

pub use classify::classify;
pub use config::{EnrichConfig, Endpoints};
pub use error::EnrichmentError;
pub use resolver::{Enrichment, Resolver};
pub use title::normalize;
