pub mod company;
pub mod disability;
pub mod requirement;
pub mod responsibility;
pub mod skill;
pub mod user;
pub mod vacancy;
