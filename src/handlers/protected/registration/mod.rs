// POST and DELETE /subjects/register
pub mod register_delete;
pub mod register_post;

pub use register_delete::register_delete;
pub use register_post::register_post;
