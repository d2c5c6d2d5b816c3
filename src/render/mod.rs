pub mod page;
pub mod question;

pub use page::{render_app_page, render_page};
pub use question::render_question;
