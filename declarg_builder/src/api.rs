mod command;
mod convert;
mod declaration;
mod validator;

pub use command::*;
pub use convert::*;
pub use declaration::*;
pub use validator::*;
pub(crate) use validator::run_chain;
