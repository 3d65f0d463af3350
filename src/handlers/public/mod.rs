// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Service metadata and liveness only. Nothing here touches registration data.
pub mod health;
pub mod root;

pub use health::health_get;
pub use root::root_get;
