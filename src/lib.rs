pub mod analyzers;
pub mod config;
pub mod error;
pub mod filter;
pub mod logging;
pub mod output;
pub mod pager;
pub mod parser;
pub mod session;
pub mod store;
pub mod trip;

pub use error::{BikeshareError, Result};
