use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque identifier of an article or post, unique within its collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContentId(pub String);

impl ContentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Customer account an item belongs to. Not to be confused with `Role::Client`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClientId(pub String);

impl ClientId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The finite set of client identities known to the dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientRoster {
    clients: Vec<ClientId>,
}

impl ClientRoster {
    pub fn new(clients: Vec<ClientId>) -> Self {
        let mut unique: Vec<ClientId> = Vec::with_capacity(clients.len());
        for client in clients {
            if !unique.contains(&client) {
                unique.push(client);
            }
        }
        Self { clients: unique }
    }

    pub fn contains(&self, client: &ClientId) -> bool {
        self.clients.contains(client)
    }

    /// Roster order is the order clients appear in selectors.
    pub fn clients(&self) -> &[ClientId] {
        &self.clients
    }

    pub fn first(&self) -> Option<&ClientId> {
        self.clients.first()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NewsCategory {
    General,
    Technology,
    Business,
    Politics,
    Sports,
    Health,
    Environment,
    Culture,
}

impl NewsCategory {
    pub const ALL: [NewsCategory; 8] = [
        NewsCategory::General,
        NewsCategory::Technology,
        NewsCategory::Business,
        NewsCategory::Politics,
        NewsCategory::Sports,
        NewsCategory::Health,
        NewsCategory::Environment,
        NewsCategory::Culture,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            NewsCategory::General => "Geral",
            NewsCategory::Technology => "Tecnologia",
            NewsCategory::Business => "Negócios",
            NewsCategory::Politics => "Política",
            NewsCategory::Sports => "Esportes",
            NewsCategory::Health => "Saúde",
            NewsCategory::Environment => "Meio Ambiente",
            NewsCategory::Culture => "Cultura",
        }
    }
}

impl fmt::Display for NewsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for NewsCategory {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        NewsCategory::ALL
            .iter()
            .copied()
            .find(|category| {
                category.label().to_lowercase() == wanted
                    || format!("{:?}", category).to_lowercase() == wanted
            })
            .ok_or_else(|| UnknownVariant {
                kind: "news category",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SocialPlatform {
    Twitter,
    Facebook,
    Instagram,
    LinkedIn,
}

impl SocialPlatform {
    pub const ALL: [SocialPlatform; 4] = [
        SocialPlatform::Twitter,
        SocialPlatform::Facebook,
        SocialPlatform::Instagram,
        SocialPlatform::LinkedIn,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SocialPlatform::Twitter => "Twitter",
            SocialPlatform::Facebook => "Facebook",
            SocialPlatform::Instagram => "Instagram",
            SocialPlatform::LinkedIn => "LinkedIn",
        }
    }
}

impl fmt::Display for SocialPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SocialPlatform {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        SocialPlatform::ALL
            .iter()
            .copied()
            .find(|platform| platform.label().to_lowercase() == wanted)
            .ok_or_else(|| UnknownVariant {
                kind: "social platform",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// A definite verdict from the classification backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub const ALL: [SentimentLabel; 3] = [
        SentimentLabel::Positive,
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
    ];

    /// Literal the backend is constrained to answer with.
    pub fn label(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positivo",
            SentimentLabel::Negative => "Negativo",
            SentimentLabel::Neutral => "Neutro",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        SentimentLabel::ALL
            .iter()
            .copied()
            .find(|candidate| candidate.label() == label.trim())
    }
}

/// Classification state of a content item.
///
/// Legal moves are `Unclassified -> Analyzing` and
/// `Analyzing -> Classified(_) | Unclassified`. Everything else is rejected by
/// [`Sentiment::transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Sentiment {
    #[default]
    Unclassified,
    Analyzing,
    Classified(SentimentLabel),
}

impl Sentiment {
    pub const POSITIVE: Sentiment = Sentiment::Classified(SentimentLabel::Positive);
    pub const NEGATIVE: Sentiment = Sentiment::Classified(SentimentLabel::Negative);
    pub const NEUTRAL: Sentiment = Sentiment::Classified(SentimentLabel::Neutral);

    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Unclassified => "Não Classificado",
            Sentiment::Analyzing => "Analisando",
            Sentiment::Classified(label) => label.label(),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Sentiment::Analyzing)
    }

    pub fn can_transition_to(&self, next: Sentiment) -> bool {
        matches!(
            (self, next),
            (Sentiment::Unclassified, Sentiment::Analyzing)
                | (Sentiment::Analyzing, Sentiment::Classified(_))
                | (Sentiment::Analyzing, Sentiment::Unclassified)
        )
    }

    pub fn transition(self, next: Sentiment) -> Result<Sentiment, IllegalTransition> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(IllegalTransition { from: self, to: next })
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("illegal sentiment transition {from} -> {to}")]
pub struct IllegalTransition {
    pub from: Sentiment,
    pub to: Sentiment,
}

/// Permission tier of the signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Assessor,
    Client,
}

impl FromStr for Role {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "assessor" => Ok(Role::Assessor),
            "client" => Ok(Role::Client),
            _ => Err(UnknownVariant {
                kind: "role",
                value: s.to_string(),
            }),
        }
    }
}

/// User-facing operations gated by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    AnalyzeSentiment,
    Download,
    Export,
    GenerateReport,
    ChangeClientScope,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: ContentId,
    pub title: String,
    pub summary: String,
    pub full_content: Option<String>,
    pub source: String,
    pub journalist: Option<String>,
    pub category: NewsCategory,
    pub image_url: String,
    pub client: ClientId,
    pub date: DateTime<Utc>,
    pub sentiment: Sentiment,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: ContentId,
    pub platform: SocialPlatform,
    pub content: String,
    pub client: ClientId,
    pub date: DateTime<Utc>,
    pub sentiment: Sentiment,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub link: String,
}

/// Shape shared by articles and posts.
pub trait ContentItem {
    fn id(&self) -> &ContentId;
    fn client(&self) -> &ClientId;
    fn date(&self) -> DateTime<Utc>;
    fn sentiment(&self) -> Sentiment;
    fn link(&self) -> &str;

    /// Text handed to the classifier, if the item can be analysed at all.
    fn analysis_text(&self) -> Option<&str>;

    /// Fields matched by free-text search.
    fn search_fields(&self) -> Vec<&str>;
}

impl ContentItem for Article {
    fn id(&self) -> &ContentId {
        &self.id
    }

    fn client(&self) -> &ClientId {
        &self.client
    }

    fn date(&self) -> DateTime<Utc> {
        self.date
    }

    fn sentiment(&self) -> Sentiment {
        self.sentiment
    }

    fn link(&self) -> &str {
        &self.link
    }

    fn analysis_text(&self) -> Option<&str> {
        self.full_content
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.title.as_str(),
            self.summary.as_str(),
            self.source.as_str(),
        ];
        if let Some(journalist) = self.journalist.as_deref() {
            fields.push(journalist);
        }
        fields
    }
}

impl ContentItem for Post {
    fn id(&self) -> &ContentId {
        &self.id
    }

    fn client(&self) -> &ClientId {
        &self.client
    }

    fn date(&self) -> DateTime<Utc> {
        self.date
    }

    fn sentiment(&self) -> Sentiment {
        self.sentiment
    }

    fn link(&self) -> &str {
        &self.link
    }

    fn analysis_text(&self) -> Option<&str> {
        Some(self.content.as_str()).filter(|text| !text.trim().is_empty())
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.content.as_str()]
    }
}

/// Which of the two collections an id addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentKind {
    Article,
    Post,
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentKind::Article => f.write_str("article"),
            ContentKind::Post => f.write_str("post"),
        }
    }
}

// Object style note:
// Everything below the session layer is a plain function over borrowed data.
// Only `state::ContentStore` owns the collections, and only the sentiment
// field is ever replaced after an item is created.
