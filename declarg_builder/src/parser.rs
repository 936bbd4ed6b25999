mod interface;
mod invocation;

pub use interface::*;
pub use invocation::*;
