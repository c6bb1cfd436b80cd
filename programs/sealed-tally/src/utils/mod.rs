pub mod access;
pub mod input;
pub mod tally;
#[cfg(test)]
pub mod testing;

pub use access::*;
pub use input::*;
pub use tally::*;
