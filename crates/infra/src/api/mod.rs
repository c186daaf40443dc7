//! HTTP adapters for the authorization server and the distribution API

pub mod distribution;
pub mod token;

pub use distribution::DistributionInfoClient;
pub use token::TokenExchangeClient;
