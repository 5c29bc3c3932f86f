pub mod auth;
pub mod brand;
pub mod common;
pub mod product;
pub mod record;
pub mod user;
