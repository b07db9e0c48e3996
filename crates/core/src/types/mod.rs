pub mod chat;
pub mod nova;
pub mod titan;
