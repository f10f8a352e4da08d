//! API Routes

pub mod audit;
pub mod email;
pub mod health;
pub mod score;
pub mod tenants;
pub mod vendors;
