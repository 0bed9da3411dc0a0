pub mod categories;
pub mod posts;

pub use categories::CategoryQueryService;
pub use posts::PostQueryService;
