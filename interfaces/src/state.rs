use crate::defs::{
    Article, ClientId, ClientRoster, ContentId, ContentItem, ContentKind, IllegalTransition, Post,
    Sentiment,
};
use std::collections::HashSet;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: ContentKind, id: ContentId },

    #[error("{kind} {id} belongs to unknown client {client}")]
    UnknownClient {
        kind: ContentKind,
        id: ContentId,
        client: ClientId,
    },

    #[error("{kind} not found: {id}")]
    NotFound { kind: ContentKind, id: ContentId },

    #[error("{kind} {id}: {source}")]
    Transition {
        kind: ContentKind,
        id: ContentId,
        #[source]
        source: IllegalTransition,
    },
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Owner of the article and post collections for one session.
///
/// Items are immutable after construction except for their sentiment, which
/// only changes through [`ContentStore::set_sentiment`].
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    roster: ClientRoster,
    articles: Vec<Article>,
    posts: Vec<Post>,
}

impl ContentStore {
    pub fn new(roster: ClientRoster, articles: Vec<Article>, posts: Vec<Post>) -> Result<Self> {
        validate(&roster, ContentKind::Article, &articles)?;
        validate(&roster, ContentKind::Post, &posts)?;

        info!(
            "Loaded content store: {} articles, {} posts, {} clients",
            articles.len(),
            posts.len(),
            roster.len()
        );

        Ok(Self {
            roster,
            articles,
            posts,
        })
    }

    pub fn roster(&self) -> &ClientRoster {
        &self.roster
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn article(&self, id: &ContentId) -> Option<&Article> {
        self.articles.iter().find(|article| &article.id == id)
    }

    pub fn post(&self, id: &ContentId) -> Option<&Post> {
        self.posts.iter().find(|post| &post.id == id)
    }

    pub fn sentiment_of(&self, kind: ContentKind, id: &ContentId) -> Result<Sentiment> {
        let found = match kind {
            ContentKind::Article => self.article(id).map(|article| article.sentiment),
            ContentKind::Post => self.post(id).map(|post| post.sentiment),
        };
        found.ok_or_else(|| StoreError::NotFound {
            kind,
            id: id.clone(),
        })
    }

    /// Replace the sentiment of the item at `id`, enforcing the lifecycle.
    /// Returns the previous value.
    pub fn set_sentiment(
        &mut self,
        kind: ContentKind,
        id: &ContentId,
        next: Sentiment,
    ) -> Result<Sentiment> {
        let slot = match kind {
            ContentKind::Article => self
                .articles
                .iter_mut()
                .find(|article| &article.id == id)
                .map(|article| &mut article.sentiment),
            ContentKind::Post => self
                .posts
                .iter_mut()
                .find(|post| &post.id == id)
                .map(|post| &mut post.sentiment),
        };

        let slot = slot.ok_or_else(|| StoreError::NotFound {
            kind,
            id: id.clone(),
        })?;

        let previous = *slot;
        *slot = previous
            .transition(next)
            .map_err(|source| StoreError::Transition {
                kind,
                id: id.clone(),
                source,
            })?;

        debug!("{} {} sentiment: {} -> {}", kind, id, previous, next);
        Ok(previous)
    }
}

fn validate<T: ContentItem>(roster: &ClientRoster, kind: ContentKind, items: &[T]) -> Result<()> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.id()) {
            return Err(StoreError::DuplicateId {
                kind,
                id: item.id().clone(),
            });
        }
        if !roster.contains(item.client()) {
            return Err(StoreError::UnknownClient {
                kind,
                id: item.id().clone(),
                client: item.client().clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::SocialPlatform;
    use chrono::{TimeZone, Utc};

    fn post(id: &str, client: &str) -> Post {
        Post {
            id: ContentId::new(id),
            platform: SocialPlatform::Twitter,
            content: "Ótimo atendimento hoje".to_string(),
            client: ClientId::new(client),
            date: Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap(),
            sentiment: Sentiment::Unclassified,
            likes: 3,
            comments: 1,
            shares: 0,
            link: "https://twitter.com/x/status/1".to_string(),
        }
    }

    fn roster() -> ClientRoster {
        ClientRoster::new(vec![ClientId::new("Cliente A"), ClientId::new("Cliente B")])
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = ContentStore::new(
            roster(),
            vec![],
            vec![post("p1", "Cliente A"), post("p1", "Cliente B")],
        )
        .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId { kind: ContentKind::Post, .. }));
    }

    #[test]
    fn rejects_clients_outside_the_roster() {
        let err = ContentStore::new(roster(), vec![], vec![post("p1", "Cliente Z")]).unwrap_err();
        assert!(matches!(err, StoreError::UnknownClient { .. }));
    }

    #[test]
    fn sentiment_updates_touch_only_the_addressed_item() {
        let mut store = ContentStore::new(
            roster(),
            vec![],
            vec![post("p1", "Cliente A"), post("p2", "Cliente B")],
        )
        .unwrap();
        let id = ContentId::new("p2");

        store.set_sentiment(ContentKind::Post, &id, Sentiment::Analyzing).unwrap();
        store.set_sentiment(ContentKind::Post, &id, Sentiment::NEGATIVE).unwrap();

        assert_eq!(store.posts()[0].sentiment, Sentiment::Unclassified);
        assert_eq!(store.posts()[1].sentiment, Sentiment::NEGATIVE);
    }

    #[test]
    fn illegal_transitions_leave_the_item_untouched() {
        let mut store = ContentStore::new(roster(), vec![], vec![post("p1", "Cliente A")]).unwrap();
        let id = ContentId::new("p1");

        let err = store
            .set_sentiment(ContentKind::Post, &id, Sentiment::POSITIVE)
            .unwrap_err();
        assert!(matches!(err, StoreError::Transition { .. }));
        assert_eq!(store.sentiment_of(ContentKind::Post, &id).unwrap(), Sentiment::Unclassified);

        let missing = store.set_sentiment(ContentKind::Article, &id, Sentiment::Analyzing);
        assert!(matches!(missing, Err(StoreError::NotFound { .. })));
    }
}
