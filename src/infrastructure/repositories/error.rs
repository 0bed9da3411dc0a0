use crate::domain::errors::DomainError;

const CNT_POST_SLUG: &str = "posts_slug_key";
const CNT_CATEGORY_SLUG: &str = "categories_slug_key";
const CNT_ASSIGNMENT_PAIR: &str = "post_categories_post_id_category_id_key";
const CNT_ASSIGNMENT_POST: &str = "post_categories_post_id_fkey";
const CNT_ASSIGNMENT_CATEGORY: &str = "post_categories_category_id_fkey";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    // A concurrent writer won the slug race after our probe
                    // loop; surfaced as an internal failure, not a retry.
                    CNT_POST_SLUG => {
                        DomainError::Persistence("post slug taken by concurrent write".into())
                    }
                    CNT_CATEGORY_SLUG => {
                        DomainError::Persistence("category slug taken by concurrent write".into())
                    }
                    CNT_ASSIGNMENT_PAIR => {
                        DomainError::Conflict("category is already assigned to this post".into())
                    }
                    CNT_ASSIGNMENT_POST => DomainError::NotFound("post not found".into()),
                    CNT_ASSIGNMENT_CATEGORY => DomainError::NotFound("category not found".into()),
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23503" => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}
