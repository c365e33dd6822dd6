pub mod catalog;
pub mod spec;

pub use catalog::*;
pub use spec::*;
