pub mod subject_delete;
pub mod subject_get;
pub mod subject_post;
pub mod subject_put;

pub use subject_delete::subject_delete;
pub use subject_get::subject_get;
pub use subject_post::subject_post;
pub use subject_put::subject_put;
