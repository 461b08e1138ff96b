pub mod config;
pub mod logging;

pub mod capture;
pub mod dispatch;
pub mod stream;
pub mod target;
