//! Engine core: configuration, errors, and the `PosState` facade

pub mod config;
pub mod error;
pub mod state;

pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use state::PosState;
