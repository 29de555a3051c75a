pub mod api;
pub mod parse;

pub use api::RapidApiRedditClient;
