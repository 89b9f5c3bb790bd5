pub mod favorite;
pub mod property;
pub mod property_image;
pub mod user;
