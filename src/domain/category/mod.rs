pub mod entity;
pub mod repository;
pub mod value_objects;

pub use entity::{
    Category, CategoryAssignment, CategorySummary, CategoryUpdate, CategoryWithCount,
    CategoryWithPosts, NewCategory,
};
pub use repository::{
    CategoryAssignmentRepository, CategoryReadRepository, CategoryWriteRepository,
};
pub use value_objects::{CategoryId, CategoryName, CategorySlug};
