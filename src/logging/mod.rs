//! Console logging for the `jwmrc` binary.

mod logger;
mod subscriber;

pub use logger::{Logger, STAGE_TARGET};
pub use subscriber::{LOG_ENV_VAR, init_subscriber};
