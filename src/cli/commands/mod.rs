mod activity;
mod generate;
mod serve;
mod user;

pub use activity::cmd_activity_export;
pub use generate::cmd_generate;
pub use serve::cmd_serve;
pub use user::{cmd_user_create, cmd_user_delete, cmd_user_list};
