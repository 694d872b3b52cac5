mod common;
mod home;
mod posts;

pub use common::{health, root};
pub use home::{get_home, MAX_PAGES};
pub use posts::{get_post, list_categories, PostDetail};
