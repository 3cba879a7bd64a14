pub mod url_check;

pub use url_check::*;
