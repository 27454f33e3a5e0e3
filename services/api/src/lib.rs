pub mod adapters;
pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod error;
pub mod web;

#[cfg(test)]
mod test_support;
