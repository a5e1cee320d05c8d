pub mod audit;
pub mod project;
pub mod role;
pub mod session;
pub mod user;
