pub mod app;
pub mod requests;

pub use app::{make_test_app, make_test_app_with};
