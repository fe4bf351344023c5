pub mod check;
pub mod library;
pub mod resolve;
