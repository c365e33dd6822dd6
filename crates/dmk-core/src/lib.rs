pub mod error;
pub mod state;
pub mod value;

pub use error::ModKitError;
pub use state::*;
pub use value::*;
