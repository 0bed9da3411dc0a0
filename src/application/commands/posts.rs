// src/application/commands/posts.rs
use crate::{
    application::{
        dto::PostDto,
        error::{ApplicationError, ApplicationResult},
        ports::{time::Clock, util::SlugGenerator},
    },
    domain::{
        category::CategoryId,
        post::{
            NewPost, PostContent, PostId, PostReadRepository, PostTitle, PostUpdate,
            PostWriteRepository,
        },
    },
};
use std::sync::Arc;

/// Base used when the title slugifies to nothing (all punctuation).
const FALLBACK_SLUG_BASE: &str = "post";

pub struct CreatePostCommand {
    pub title: String,
    pub content: String,
    pub published: bool,
    pub category_ids: Vec<i64>,
}

pub struct UpdatePostCommand {
    pub id: i64,
    pub title: Option<String>,
    pub content: Option<String>,
    pub published: Option<bool>,
    /// `None` leaves links untouched; `Some` replaces them wholesale.
    pub category_ids: Option<Vec<i64>>,
}

pub struct DeletePostCommand {
    pub id: i64,
}

pub struct PostCommandService {
    write_repo: Arc<dyn PostWriteRepository>,
    read_repo: Arc<dyn PostReadRepository>,
    slugger: Arc<dyn SlugGenerator>,
    clock: Arc<dyn Clock>,
}

impl PostCommandService {
    pub fn new(
        write_repo: Arc<dyn PostWriteRepository>,
        read_repo: Arc<dyn PostReadRepository>,
        slugger: Arc<dyn SlugGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            write_repo,
            read_repo,
            slugger,
            clock,
        }
    }

    pub async fn create_post(&self, command: CreatePostCommand) -> ApplicationResult<PostDto> {
        let title = PostTitle::new(command.title)?;
        let content = PostContent::new(command.content)?;
        let category_ids = parse_category_ids(&command.category_ids)?;
        let now = self.clock.now();

        let new_post = NewPost {
            slug_base: self.slug_base(title.as_str()),
            title,
            content,
            published: command.published,
            created_at: now,
            updated_at: now,
        };

        let created = self.write_repo.insert(new_post, &category_ids).await?;
        Ok(created.into())
    }

    pub async fn update_post(&self, command: UpdatePostCommand) -> ApplicationResult<PostDto> {
        let id = PostId::new(command.id)?;
        let existing = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("post not found"))?;

        let now = self.clock.now();
        let mut update = PostUpdate::new(id, now);

        if let Some(title) = command.title {
            let title = PostTitle::new(title)?;
            // Slug recomputation only when the title actually changed value.
            if title != existing.post.title {
                update = update.with_slug_base(self.slug_base(title.as_str()));
            }
            update = update.with_title(title);
        }

        if let Some(content) = command.content {
            update = update.with_content(PostContent::new(content)?);
        }

        if let Some(published) = command.published {
            update = update.with_published(published);
        }

        let category_ids = command
            .category_ids
            .as_deref()
            .map(parse_category_ids)
            .transpose()?;

        let updated = self
            .write_repo
            .update(update, category_ids.as_deref())
            .await?;
        Ok(updated.into())
    }

    pub async fn delete_post(&self, command: DeletePostCommand) -> ApplicationResult<()> {
        let id = PostId::new(command.id)?;
        self.read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("post not found"))?;

        self.write_repo.delete(id).await?;
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

fn parse_category_ids(raw: &[i64]) -> ApplicationResult<Vec<CategoryId>> {
    raw.iter()
        .map(|id| CategoryId::new(*id))
        .collect::<Result<Vec<_>, _>>()
        .map_err(Into::into)
}
