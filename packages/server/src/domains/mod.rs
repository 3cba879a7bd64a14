// Business domains
pub mod checks;
pub mod urls;
