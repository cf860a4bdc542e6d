pub mod client;
pub mod models;
pub mod query;

pub use client::SubgraphClient;
pub use models::{RawDayData, RawFactory, RawPair, RawToken, SubgraphError};
