pub mod evasion;
pub mod gateway;
pub mod payload;
pub mod session;

pub use evasion::{Evasion, NoDelay, RandomDelay};
pub use gateway::{Base, RequestGateway};
pub use session::{LinkedInSession, SessionConfig};
