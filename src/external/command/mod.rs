/// Execution of the external utilities which do the actual display control
pub mod interface;
#[cfg(test)]
pub mod mock;
pub mod shell;

pub use interface::*;

#[cfg(test)]
mod test;
