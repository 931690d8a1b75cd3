// handlers/protected/auth/mod.rs - session endpoints for authenticated users

pub mod me;

pub use me::me_get;
