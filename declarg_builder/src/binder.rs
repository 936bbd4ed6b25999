mod core;
mod token;

pub use self::core::*;
