use crate::aggregator::{aggregate, DashboardSummary};
use crate::classifier::SentimentClassifier;
use crate::document::ReportDocument;
use crate::filter::{filter_items, Feed, FilterCriteria};
use crate::llm_adapter::SentimentBackend;
use crate::report::{compile_report, ReportRequest};
use crate::types::{
    Action, Article, ClientId, ClippingError, ContentId, ContentItem, ContentKind, ContentStore,
    Post, ReportLayout, Result, Role, Sentiment, StoreError,
};
use futures::future::join_all;
use interfaces::access;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Top-level coordinator for one signed-in user.
///
/// Holds the role, the active client scope and the only handle to the content
/// store. Everything it exposes is read through the pure engines except
/// sentiment analysis, which writes back one item at a time.
pub struct Session {
    role: Role,
    client_scope: Option<ClientId>,
    store: Arc<RwLock<ContentStore>>,
    layout: ReportLayout,
}

impl Session {
    /// Client-role sessions are pinned to the first client of the roster;
    /// staff sessions start unscoped.
    pub fn login(role: Role, store: ContentStore) -> Self {
        let client_scope = match role {
            Role::Client => store.roster().first().cloned(),
            Role::Admin | Role::Assessor => None,
        };

        info!("Logged in as {:?} (client scope: {:?})", role, client_scope);

        Self {
            role,
            client_scope,
            store: Arc::new(RwLock::new(store)),
            layout: ReportLayout::default(),
        }
    }

    pub fn with_layout(mut self, layout: ReportLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn layout(&self) -> ReportLayout {
        self.layout
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn client_scope(&self) -> Option<&ClientId> {
        self.client_scope.as_ref()
    }

    pub fn actions(&self) -> BTreeSet<Action> {
        access::allowed_actions(self.role)
    }

    pub fn store(&self) -> Arc<RwLock<ContentStore>> {
        self.store.clone()
    }

    fn require(&self, action: Action) -> Result<()> {
        if access::can(self.role, action) {
            Ok(())
        } else {
            warn!("{:?} attempted {:?}", self.role, action);
            Err(ClippingError::PermissionDenied {
                role: self.role,
                action,
            })
        }
    }

    /// Change the client every feed defaults to. `None` clears the scope.
    pub async fn set_client_scope(&mut self, client: Option<ClientId>) -> Result<()> {
        self.require(Action::ChangeClientScope)?;

        if let Some(client) = &client {
            let store = self.store.read().await;
            if !store.roster().contains(client) {
                return Err(ClippingError::Config(format!("unknown client: {}", client)));
            }
        }

        info!("Client scope changed to {:?}", client);
        self.client_scope = client;
        Ok(())
    }

    /// The session scope fills an unset client axis; client roles cannot
    /// override it.
    fn effective_criteria(&self, criteria: FilterCriteria) -> FilterCriteria {
        let criteria = match (&criteria.client, &self.client_scope) {
            (None, Some(scope)) => criteria.with_client(scope.clone()),
            _ => criteria,
        };
        criteria.scoped_to(self.role, self.client_scope.as_ref())
    }

    pub async fn news_feed(&self, criteria: FilterCriteria) -> Feed<Article> {
        let criteria = self.effective_criteria(criteria);
        let store = self.store.read().await;
        filter_items(store.articles(), &criteria).to_feed()
    }

    pub async fn social_feed(&self, criteria: FilterCriteria) -> Feed<Post> {
        let criteria = self.effective_criteria(criteria);
        let store = self.store.read().await;
        filter_items(store.posts(), &criteria).to_feed()
    }

    /// Dashboard figures over both collections, narrowed to the client scope
    /// when one is active.
    pub async fn dashboard(&self) -> DashboardSummary {
        let store = self.store.read().await;
        match &self.client_scope {
            None => aggregate(store.articles(), store.posts()),
            Some(client) => {
                let criteria = FilterCriteria::new().with_client(client.clone());
                let articles: Vec<Article> = filter_items(store.articles(), &criteria).to_feed().items;
                let posts: Vec<Post> = filter_items(store.posts(), &criteria).to_feed().items;
                aggregate(&articles, &posts)
            }
        }
    }

    pub async fn compile_report(&self, request: &ReportRequest) -> Result<ReportDocument> {
        self.require(Action::GenerateReport)?;
        let store = self.store.read().await;
        Ok(compile_report(store.articles(), store.posts(), request, self.layout))
    }

    pub async fn analyze_article<B: SentimentBackend>(
        &self,
        id: &ContentId,
        classifier: &SentimentClassifier<B>,
    ) -> Result<Sentiment> {
        self.analyze(ContentKind::Article, id, classifier).await
    }

    pub async fn analyze_post<B: SentimentBackend>(
        &self,
        id: &ContentId,
        classifier: &SentimentClassifier<B>,
    ) -> Result<Sentiment> {
        self.analyze(ContentKind::Post, id, classifier).await
    }

    /// Mark the item pending, classify it without holding the lock, then
    /// store whatever the classifier returned.
    pub async fn analyze<B: SentimentBackend>(
        &self,
        kind: ContentKind,
        id: &ContentId,
        classifier: &SentimentClassifier<B>,
    ) -> Result<Sentiment> {
        self.require(Action::AnalyzeSentiment)?;

        let text = {
            let mut store = self.store.write().await;
            let text = match kind {
                ContentKind::Article => store.article(id).map(analysis_text),
                ContentKind::Post => store.post(id).map(analysis_text),
            }
            .ok_or_else(|| StoreError::NotFound {
                kind,
                id: id.clone(),
            })?
            .ok_or_else(|| ClippingError::NotEligible {
                kind,
                id: id.clone(),
            })?;

            store.set_sentiment(kind, id, Sentiment::Analyzing)?;
            text
        };

        let outcome = classifier.classify(&text).await;

        self.store.write().await.set_sentiment(kind, id, outcome)?;
        info!("{} {} classified as {}", kind, id, outcome);
        Ok(outcome)
    }

    /// Analyse every eligible, unclassified item of one collection
    /// concurrently. Results keep collection order.
    pub async fn analyze_pending<B: SentimentBackend>(
        &self,
        kind: ContentKind,
        classifier: &SentimentClassifier<B>,
    ) -> Result<Vec<(ContentId, Result<Sentiment>)>> {
        self.require(Action::AnalyzeSentiment)?;

        let ids: Vec<ContentId> = {
            let store = self.store.read().await;
            match kind {
                ContentKind::Article => pending_ids(store.articles()),
                ContentKind::Post => pending_ids(store.posts()),
            }
        };

        info!("Analysing {} pending {} items", ids.len(), kind);

        let results = join_all(ids.iter().map(|id| self.analyze(kind, id, classifier))).await;
        Ok(ids.into_iter().zip(results).collect())
    }
}

fn analysis_text<T: ContentItem>(item: &T) -> Option<String> {
    item.analysis_text().map(str::to_string)
}

fn pending_ids<T: ContentItem>(items: &[T]) -> Vec<ContentId> {
    items
        .iter()
        .filter(|item| item.sentiment() == Sentiment::Unclassified && item.analysis_text().is_some())
        .map(|item| item.id().clone())
        .collect()
}
