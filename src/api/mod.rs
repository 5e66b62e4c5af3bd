pub mod espn_api;

pub use espn_api::{EspnClient, ESPN_CORE_API_BASE};
