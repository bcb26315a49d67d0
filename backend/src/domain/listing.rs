//! Cross-organization listing aggregation.
//!
//! A user's "mine" listing is assembled from every organization they are
//! responsible for (in the order the oracle reports them) followed by the
//! records they authored personally. Later duplicates of an id are dropped,
//! then the page window is applied in memory.

use std::collections::HashSet;
use std::hash::Hash;

use async_trait::async_trait;
use pagination::Page;

use super::{Error, OrganizationId, UserId};

/// Supplies the per-organization and personal record sets to aggregate.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Record type being listed.
    type Item: Send;
    /// Identity used for de-duplication.
    type Key: Eq + Hash + Send;

    /// Identity of a record.
    fn key_of(item: &Self::Item) -> Self::Key;

    /// Records belonging to one organization.
    async fn for_organization(&self, organization: OrganizationId)
    -> Result<Vec<Self::Item>, Error>;

    /// Records the user authored personally.
    async fn for_user(&self, user: UserId) -> Result<Vec<Self::Item>, Error>;
}

/// Concatenate, de-duplicate by key keeping the first occurrence, then window.
pub async fn aggregate<S>(
    source: &S,
    organizations: &[OrganizationId],
    user: UserId,
    page: Page,
) -> Result<Vec<S::Item>, Error>
where
    S: ListingSource + ?Sized,
{
    let mut collected = Vec::new();
    for organization in organizations {
        collected.extend(source.for_organization(*organization).await?);
    }
    collected.extend(source.for_user(user).await?);

    let mut seen = HashSet::new();
    let unique: Vec<S::Item> = collected
        .into_iter()
        .filter(|item| seen.insert(S::key_of(item)))
        .collect();
    Ok(page.window(unique))
}
