// src/infrastructure/repositories/slug.rs
//
// Uniqueness resolution for slugs. Runs on the caller's open transaction so
// the probe and the subsequent insert/update commit together; the unique
// constraint on the slug column backstops whatever still slips through.

use super::error::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use sqlx::PgConnection;

/// Hard cap on probe iterations. Hitting it means something is
/// pathologically wrong with the data, not normal collision churn.
pub const MAX_SLUG_ATTEMPTS: u32 = 1000;

#[derive(Debug, Clone, Copy)]
pub enum SlugTable {
    Posts,
    Categories,
}

/// Headroom reserved for the widest counter suffix (`-999`).
const SUFFIX_HEADROOM: usize = 4;

impl SlugTable {
    fn name(self) -> &'static str {
        match self {
            Self::Posts => "posts",
            Self::Categories => "categories",
        }
    }

    /// Width of the table's VARCHAR slug column.
    fn max_len(self) -> usize {
        match self {
            Self::Posts => 255,
            Self::Categories => 100,
        }
    }
}

/// The n-th candidate for a base: `base`, `base-1`, `base-2`, …
pub fn candidate(base: &str, attempt: u32) -> String {
    if attempt == 0 {
        base.to_string()
    } else {
        format!("{base}-{attempt}")
    }
}

/// Shorten `base` so every candidate up to the attempt cap still fits the
/// column. A cut can land on a hyphen; strip it so candidates stay clean.
fn clamp_base(base: &str, max_len: usize) -> &str {
    let budget = max_len.saturating_sub(SUFFIX_HEADROOM);
    if base.len() <= budget {
        return base;
    }
    base[..budget].trim_end_matches('-')
}

/// Probe for the first slug derived from `base` that no row in `table`
/// holds, skipping the row in `exclude_id` (the entity being updated).
pub async fn resolve_unique_slug(
    conn: &mut PgConnection,
    table: SlugTable,
    base: &str,
    exclude_id: Option<i64>,
) -> DomainResult<String> {
    let query = format!(
        "SELECT EXISTS (SELECT 1 FROM {} WHERE slug = $1 AND ($2::bigint IS NULL OR id <> $2))",
        table.name()
    );
    let base = clamp_base(base, table.max_len());

    for attempt in 0..MAX_SLUG_ATTEMPTS {
        let slug = candidate(base, attempt);
        let taken: bool = sqlx::query_scalar(&query)
            .bind(&slug)
            .bind(exclude_id)
            .fetch_one(&mut *conn)
            .await
            .map_err(map_sqlx)?;

        if !taken {
            return Ok(slug);
        }
    }

    Err(DomainError::Persistence(format!(
        "exhausted {MAX_SLUG_ATTEMPTS} slug candidates for base '{base}'"
    )))
}
