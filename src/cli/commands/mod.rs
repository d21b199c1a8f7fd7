//! CLI command implementations.

mod ask;
mod chat;
mod config;
mod doctor;
mod list;
mod scrape;
mod search;

pub use ask::run_ask;
pub use chat::run_chat;
pub use config::run_config;
pub use doctor::run_doctor;
pub use list::run_list;
pub use scrape::run_scrape;
pub use search::run_search;
