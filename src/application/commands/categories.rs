// src/application/commands/categories.rs
use crate::{
    application::{
        dto::{CategoryAssignmentDto, CategoryDto},
        error::{ApplicationError, ApplicationResult},
        ports::{time::Clock, util::SlugGenerator},
    },
    domain::{
        category::{
            CategoryAssignmentRepository, CategoryId, CategoryName, CategoryReadRepository,
            CategoryUpdate, CategoryWriteRepository, NewCategory,
        },
        post::{PostId, PostReadRepository},
    },
};
use std::sync::Arc;

const FALLBACK_SLUG_BASE: &str = "category";

pub struct CreateCategoryCommand {
    pub name: String,
    pub description: Option<String>,
}

pub struct UpdateCategoryCommand {
    pub id: i64,
    pub name: Option<String>,
    pub description: Option<String>,
}

pub struct DeleteCategoryCommand {
    pub id: i64,
}

pub struct AssignCategoryCommand {
    pub post_id: i64,
    pub category_id: i64,
}

pub struct RemoveCategoryCommand {
    pub post_id: i64,
    pub category_id: i64,
}

pub struct CategoryCommandService {
    write_repo: Arc<dyn CategoryWriteRepository>,
    read_repo: Arc<dyn CategoryReadRepository>,
    post_read_repo: Arc<dyn PostReadRepository>,
    assignment_repo: Arc<dyn CategoryAssignmentRepository>,
    slugger: Arc<dyn SlugGenerator>,
    clock: Arc<dyn Clock>,
}

impl CategoryCommandService {
    pub fn new(
        write_repo: Arc<dyn CategoryWriteRepository>,
        read_repo: Arc<dyn CategoryReadRepository>,
        post_read_repo: Arc<dyn PostReadRepository>,
        assignment_repo: Arc<dyn CategoryAssignmentRepository>,
        slugger: Arc<dyn SlugGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            write_repo,
            read_repo,
            post_read_repo,
            assignment_repo,
            slugger,
            clock,
        }
    }

    pub async fn create_category(
        &self,
        command: CreateCategoryCommand,
    ) -> ApplicationResult<CategoryDto> {
        let name = CategoryName::new(command.name)?;
        let now = self.clock.now();

        let new_category = NewCategory {
            slug_base: self.slug_base(name.as_str()),
            name,
            description: command.description,
            created_at: now,
            updated_at: now,
        };

        let created = self.write_repo.insert(new_category).await?;
        Ok(created.into())
    }

    pub async fn update_category(
        &self,
        command: UpdateCategoryCommand,
    ) -> ApplicationResult<CategoryDto> {
        let id = CategoryId::new(command.id)?;
        let existing = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("category not found"))?;

        let now = self.clock.now();
        let mut update = CategoryUpdate::new(id, now);

        if let Some(name) = command.name {
            let name = CategoryName::new(name)?;
            if name != existing.category.name {
                update = update.with_slug_base(self.slug_base(name.as_str()));
            }
            update = update.with_name(name);
        }

        if let Some(description) = command.description {
            update = update.with_description(description);
        }

        let updated = self.write_repo.update(update).await?;
        Ok(updated.into())
    }

    pub async fn delete_category(&self, command: DeleteCategoryCommand) -> ApplicationResult<()> {
        let id = CategoryId::new(command.id)?;
        self.read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("category not found"))?;

        // Link rows disappear through the cascade.
        self.write_repo.delete(id).await?;
        Ok(())
    }

    pub async fn assign_to_post(
        &self,
        command: AssignCategoryCommand,
    ) -> ApplicationResult<CategoryAssignmentDto> {
        let post_id = PostId::new(command.post_id)?;
        let category_id = CategoryId::new(command.category_id)?;

        self.post_read_repo
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("post not found"))?;
        self.read_repo
            .find_by_id(category_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("category not found"))?;

        let assignment = self.assignment_repo.assign(post_id, category_id).await?;
        Ok(assignment.into())
    }

    pub async fn remove_from_post(
        &self,
        command: RemoveCategoryCommand,
    ) -> ApplicationResult<()> {
        let post_id = PostId::new(command.post_id)?;
        let category_id = CategoryId::new(command.category_id)?;

        self.assignment_repo.remove(post_id, category_id).await?;
        Ok(())
    }

    fn slug_base(&self, source: &str) -> String {
        let base = self.slugger.slugify(source);
        if base.is_empty() {
            FALLBACK_SLUG_BASE.to_string()
        } else {
            base
        }
    }
}
