pub mod identifier;
pub mod profile;

pub use identifier::*;
pub use profile::*;
