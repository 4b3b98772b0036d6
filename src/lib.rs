pub mod config;
pub mod constants;
pub mod frames;
pub mod logging;
pub mod monitor;
pub mod notify;

pub use posture_signals as signals;
