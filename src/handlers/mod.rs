pub mod about;
pub mod auth;
pub mod home;
pub mod skills;

pub use about::list_about;
pub use auth::issue_token;
pub use skills::{append_sub_skill, create_skill, delete_skill, list_skills, update_skill};
