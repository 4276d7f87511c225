pub mod info;
pub mod scramble;

pub use info::*;
pub use scramble::*;
