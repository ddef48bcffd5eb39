pub mod cart;
pub mod measurements;
pub mod orders;
pub mod products;
pub mod users;
