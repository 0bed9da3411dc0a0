// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::{CategoryCommandService, PostCommandService},
        ports::{time::Clock, util::SlugGenerator},
        queries::{CategoryQueryService, PostQueryService},
    },
    domain::{
        category::{
            CategoryAssignmentRepository, CategoryReadRepository, CategoryWriteRepository,
        },
        post::{PostReadRepository, PostWriteRepository},
    },
};

pub struct ApplicationServices {
    pub post_commands: Arc<PostCommandService>,
    pub post_queries: Arc<PostQueryService>,
    pub category_commands: Arc<CategoryCommandService>,
    pub category_queries: Arc<CategoryQueryService>,
}

impl ApplicationServices {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        post_write_repo: Arc<dyn PostWriteRepository>,
        post_read_repo: Arc<dyn PostReadRepository>,
        category_write_repo: Arc<dyn CategoryWriteRepository>,
        category_read_repo: Arc<dyn CategoryReadRepository>,
        assignment_repo: Arc<dyn CategoryAssignmentRepository>,
        clock: Arc<dyn Clock>,
        slugger: Arc<dyn SlugGenerator>,
    ) -> Self {
        let post_commands = Arc::new(PostCommandService::new(
            Arc::clone(&post_write_repo),
            Arc::clone(&post_read_repo),
            Arc::clone(&slugger),
            Arc::clone(&clock),
        ));

        let category_commands = Arc::new(CategoryCommandService::new(
            Arc::clone(&category_write_repo),
            Arc::clone(&category_read_repo),
            Arc::clone(&post_read_repo),
            Arc::clone(&assignment_repo),
            Arc::clone(&slugger),
            Arc::clone(&clock),
        ));

        let post_queries = Arc::new(PostQueryService::new(Arc::clone(&post_read_repo)));
        let category_queries = Arc::new(CategoryQueryService::new(Arc::clone(&category_read_repo)));

        Self {
            post_commands,
            post_queries,
            category_commands,
            category_queries,
        }
    }
}
