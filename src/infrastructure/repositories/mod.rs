// src/infrastructure/repositories/mod.rs
mod error;
mod postgres_category;
mod postgres_post;
mod slug;

pub use postgres_category::{
    PostgresCategoryAssignmentRepository, PostgresCategoryReadRepository,
    PostgresCategoryWriteRepository,
};
pub use postgres_post::{PostgresPostReadRepository, PostgresPostWriteRepository};
