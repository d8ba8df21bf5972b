pub mod github;
pub mod utils;
