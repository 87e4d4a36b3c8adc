//! Page modules

pub mod atm;

pub use atm::AtmPage;
