pub mod book;
pub mod query;
pub mod responses;
