// handlers/mod.rs - two security tiers
//
// Public (no auth) → Protected (bearer token required)
pub mod public; // /auth/*, /, /health
pub mod protected; // /users/*, /bookmarks/*
