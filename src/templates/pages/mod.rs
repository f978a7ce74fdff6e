pub mod home;
pub mod results;

pub use home::{home_page, search_form};
pub use results::results_page;
