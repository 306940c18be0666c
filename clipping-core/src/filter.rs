use crate::types::{Article, ClientId, ContentItem, NewsCategory, Post, Role, SocialPlatform};
use tracing::debug;

/// Independent predicate axes, combined with AND. `None` (or a blank search
/// term) leaves an axis unconstrained.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub search: Option<String>,
    pub category: Option<NewsCategory>,
    pub platform: Option<SocialPlatform>,
    pub client: Option<ClientId>,
    /// Client role without an identity of its own: nothing may match.
    no_client: bool,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn with_category(mut self, category: NewsCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_platform(mut self, platform: SocialPlatform) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn with_client(mut self, client: ClientId) -> Self {
        self.client = Some(client);
        self
    }

    /// Force the client axis for client-role sessions. Other roles keep
    /// whatever the caller selected.
    pub fn scoped_to(mut self, role: Role, own_client: Option<&ClientId>) -> Self {
        if role == Role::Client {
            self.client = own_client.cloned();
            self.no_client = own_client.is_none();
        }
        self
    }

    fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase)
    }

    /// True when at least one axis constrains items of kind `T`. A category
    /// never constrains posts and a platform never constrains articles.
    pub fn is_active_for<T: Filterable>(&self) -> bool {
        self.search_term().is_some()
            || T::kind_axis_active(self)
            || self.client.is_some()
            || self.no_client
    }
}

/// Variant-specific part of the predicate: category for articles, platform for
/// posts.
pub trait Filterable: ContentItem {
    /// Whether the variant-specific axis is set for this kind.
    fn kind_axis_active(criteria: &FilterCriteria) -> bool;

    fn matches_kind(&self, criteria: &FilterCriteria) -> bool;
}

impl Filterable for Article {
    fn kind_axis_active(criteria: &FilterCriteria) -> bool {
        criteria.category.is_some()
    }

    fn matches_kind(&self, criteria: &FilterCriteria) -> bool {
        criteria.category.map_or(true, |category| self.category == category)
    }
}

impl Filterable for Post {
    fn kind_axis_active(criteria: &FilterCriteria) -> bool {
        criteria.platform.is_some()
    }

    fn matches_kind(&self, criteria: &FilterCriteria) -> bool {
        criteria.platform.map_or(true, |platform| self.platform == platform)
    }
}

/// Result of running a feed through the filter engine.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutcome<'a, T> {
    /// No axis was set; the input is returned as is.
    Unfiltered(Vec<&'a T>),
    /// At least one axis was set. May be empty.
    Matched(Vec<&'a T>),
}

impl<'a, T> FilterOutcome<'a, T> {
    pub fn items(&self) -> &[&'a T] {
        match self {
            FilterOutcome::Unfiltered(items) | FilterOutcome::Matched(items) => items,
        }
    }

    pub fn into_items(self) -> Vec<&'a T> {
        match self {
            FilterOutcome::Unfiltered(items) | FilterOutcome::Matched(items) => items,
        }
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    pub fn filters_applied(&self) -> bool {
        matches!(self, FilterOutcome::Matched(_))
    }

    /// Active filters that matched nothing; rendered as an explicit empty state.
    pub fn is_empty_match(&self) -> bool {
        matches!(self, FilterOutcome::Matched(items) if items.is_empty())
    }
}

/// Owned copy of a filter result, for callers that cannot hold a borrow of
/// the source collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Feed<T> {
    pub items: Vec<T>,
    pub filters_applied: bool,
}

impl<T> Feed<T> {
    pub fn is_empty_match(&self) -> bool {
        self.filters_applied && self.items.is_empty()
    }
}

impl<'a, T: Clone> FilterOutcome<'a, T> {
    pub fn to_feed(&self) -> Feed<T> {
        Feed {
            items: self.items().iter().map(|item| (*item).clone()).collect(),
            filters_applied: self.filters_applied(),
        }
    }
}

pub fn matches<T: Filterable>(item: &T, criteria: &FilterCriteria) -> bool {
    if criteria.no_client {
        return false;
    }

    let matches_search = match criteria.search_term() {
        Some(term) => item
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&term)),
        None => true,
    };

    let matches_client = criteria
        .client
        .as_ref()
        .map_or(true, |client| item.client() == client);

    matches_search && item.matches_kind(criteria) && matches_client
}

/// Order-preserving subsequence of `items` satisfying every active axis.
pub fn filter_items<'a, T: Filterable>(items: &'a [T], criteria: &FilterCriteria) -> FilterOutcome<'a, T> {
    if !criteria.is_active_for::<T>() {
        return FilterOutcome::Unfiltered(items.iter().collect());
    }

    let kept: Vec<&T> = items.iter().filter(|item| matches(*item, criteria)).collect();
    debug!("Filter kept {} of {} items", kept.len(), items.len());
    FilterOutcome::Matched(kept)
}

/// Options offered by the category selector.
pub fn category_options() -> &'static [NewsCategory] {
    &NewsCategory::ALL
}

/// Options offered by the platform selector.
pub fn platform_options() -> &'static [SocialPlatform] {
    &SocialPlatform::ALL
}
