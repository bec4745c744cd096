//! SQLite storage implementation for loans.

mod model;
mod repository;

pub use model::LoanDB;
pub use repository::LoanRepository;

pub(crate) use model::parse_money;
