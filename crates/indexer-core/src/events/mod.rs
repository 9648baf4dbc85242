pub mod creature_token;
pub mod factory;

pub use creature_token::*;
pub use factory::*;
