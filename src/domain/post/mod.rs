pub mod entity;
pub mod repository;
pub mod value_objects;

pub use entity::{NewPost, Post, PostSummary, PostUpdate, PostWithCategories};
pub use repository::{PostListFilter, PostPage, PostReadRepository, PostWriteRepository};
pub use value_objects::{PostContent, PostId, PostSlug, PostTitle};
