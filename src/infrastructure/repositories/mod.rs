//! Repository implementations using SeaORM

pub mod favorite_repository;
pub mod property_repository;
pub mod user_repository;

pub use favorite_repository::SeaOrmFavoriteRepository;
pub use property_repository::SeaOrmPropertyRepository;
pub use user_repository::SeaOrmUserRepository;
