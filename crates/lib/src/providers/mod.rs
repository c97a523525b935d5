//! AI provider backends and the factory that builds them from configuration.

pub mod ai;
pub mod factory;

pub use factory::create_provider;
