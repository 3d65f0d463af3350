// handlers/mod.rs - two security tiers
//
// Public (no auth) → Protected (JWT auth, `Caller` in request extensions)
pub mod protected;
pub mod public;
