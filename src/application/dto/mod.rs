pub mod categories;
pub mod pagination;
pub mod posts;

pub use categories::{
    CategoryAssignmentDto, CategoryDto, CategoryWithCountDto, CategoryWithPostsDto,
};
pub use pagination::Page;
pub use posts::{CategorySummaryDto, PostDto, PostSummaryDto};
