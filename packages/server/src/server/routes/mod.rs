// HTTP routes
pub mod checks;
pub mod health;
pub mod urls;

pub use checks::*;
pub use health::*;
pub use urls::*;
