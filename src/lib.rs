pub mod apikey;
pub mod bot;
pub mod components;
pub mod config;
pub mod error;
pub mod implements;
pub mod interfaces;
pub mod logger;
pub mod markets;
pub mod quote;
pub mod strategies;
pub mod types;

#[cfg(test)]
mod testing;
