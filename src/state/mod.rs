pub mod error;
pub mod feed;
pub mod session;

pub use error::*;
pub use feed::*;
pub use session::*;
