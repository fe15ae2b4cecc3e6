pub mod health;
pub mod podcast;
pub mod upload;
pub mod voices;
