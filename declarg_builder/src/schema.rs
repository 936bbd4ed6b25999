mod annotation;
mod definition;
mod extract;

pub use definition::*;
pub use extract::*;
