pub mod capture;
pub mod reporter;
