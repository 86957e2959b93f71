pub mod config;
pub mod error;
pub mod logger;
pub mod content;
pub mod text_utils;
pub mod post;
pub mod excerpt;
pub mod paginator;
pub mod post_collection;
pub mod post_list;
pub mod post_processor;
pub mod routes;
pub mod view;
pub mod site_export;
mod test_data;
