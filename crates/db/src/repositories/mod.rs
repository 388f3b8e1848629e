//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod attraction_repo;
pub mod comment_repo;
pub mod destination_repo;
pub mod favorite_repo;
pub mod image_repo;
pub mod itinerary_day_repo;
pub mod itinerary_item_repo;
pub mod itinerary_repo;
pub mod tag_repo;
pub mod user_repo;

pub use attraction_repo::AttractionRepo;
pub use comment_repo::CommentRepo;
pub use destination_repo::DestinationRepo;
pub use favorite_repo::FavoriteRepo;
pub use image_repo::ImageRepo;
pub use itinerary_day_repo::ItineraryDayRepo;
pub use itinerary_item_repo::ItineraryItemRepo;
pub use itinerary_repo::ItineraryRepo;
pub use tag_repo::TagRepo;
pub use user_repo::UserRepo;
