use crate::types::{Article, ContentItem, NewsCategory, Post, Sentiment, SentimentLabel, SocialPlatform};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// Raw per-state sentiment counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub unclassified: usize,
    pub analyzing: usize,
}

impl SentimentCounts {
    pub fn tally<I>(sentiments: I) -> Self
    where
        I: IntoIterator<Item = Sentiment>,
    {
        let mut counts = Self::default();
        for sentiment in sentiments {
            counts.record(sentiment);
        }
        counts
    }

    pub fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Classified(SentimentLabel::Positive) => self.positive += 1,
            Sentiment::Classified(SentimentLabel::Negative) => self.negative += 1,
            Sentiment::Classified(SentimentLabel::Neutral) => self.neutral += 1,
            Sentiment::Unclassified => self.unclassified += 1,
            Sentiment::Analyzing => self.analyzing += 1,
        }
    }

    /// Display bucket: pending items count as unclassified.
    pub fn unclassified_display(&self) -> usize {
        self.unclassified + self.analyzing
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral + self.unclassified_display()
    }
}

/// Direction hint for a metric's change figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChangeType {
    Increase,
    Decrease,
    Neutral,
}

/// Decorative "vs. previous month" figure. Not computed from any data and
/// must not be read as a trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IllustrativeChange {
    pub text: &'static str,
    pub change_type: ChangeType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub title: &'static str,
    pub value: usize,
    pub change: IllustrativeChange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub name: String,
    pub value: usize,
}

/// Dashboard figures over the union of articles and posts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total: usize,
    pub sentiment: SentimentCounts,
    /// Only categories with at least one article.
    pub by_category: HashMap<NewsCategory, usize>,
    /// Only platforms with at least one post.
    pub by_platform: HashMap<SocialPlatform, usize>,
}

impl DashboardSummary {
    pub fn metrics(&self) -> Vec<Metric> {
        vec![
            Metric {
                title: "Total de Itens",
                value: self.total,
                change: IllustrativeChange {
                    text: "+12%",
                    change_type: ChangeType::Increase,
                },
            },
            Metric {
                title: "Itens Positivos",
                value: self.sentiment.positive,
                change: IllustrativeChange {
                    text: "+8%",
                    change_type: ChangeType::Increase,
                },
            },
            Metric {
                title: "Itens Negativos",
                value: self.sentiment.negative,
                change: IllustrativeChange {
                    text: "-3%",
                    change_type: ChangeType::Decrease,
                },
            },
            Metric {
                title: "Itens Neutros",
                value: self.sentiment.neutral,
                change: IllustrativeChange {
                    text: "+2%",
                    change_type: ChangeType::Neutral,
                },
            },
        ]
    }

    /// Pie chart data; empty buckets are left out.
    pub fn sentiment_distribution(&self) -> Vec<ChartPoint> {
        [
            (Sentiment::POSITIVE, self.sentiment.positive),
            (Sentiment::NEGATIVE, self.sentiment.negative),
            (Sentiment::NEUTRAL, self.sentiment.neutral),
            (Sentiment::Unclassified, self.sentiment.unclassified_display()),
        ]
        .into_iter()
        .filter(|(_, value)| *value > 0)
        .map(|(sentiment, value)| ChartPoint {
            name: sentiment.label().to_string(),
            value,
        })
        .collect()
    }

    pub fn category_chart(&self) -> Vec<ChartPoint> {
        let mut entries: Vec<_> = self.by_category.iter().collect();
        entries.sort_by_key(|(category, _)| **category);
        entries
            .into_iter()
            .map(|(category, value)| ChartPoint {
                name: category.label().to_string(),
                value: *value,
            })
            .collect()
    }

    pub fn platform_chart(&self) -> Vec<ChartPoint> {
        let mut entries: Vec<_> = self.by_platform.iter().collect();
        entries.sort_by_key(|(platform, _)| **platform);
        entries
            .into_iter()
            .map(|(platform, value)| ChartPoint {
                name: platform.label().to_string(),
                value: *value,
            })
            .collect()
    }
}

/// Sentiment counts over any mix of items.
pub fn count_sentiments<'a, I, T>(items: I) -> SentimentCounts
where
    I: IntoIterator<Item = &'a T>,
    T: ContentItem + 'a,
{
    SentimentCounts::tally(items.into_iter().map(|item| item.sentiment()))
}

pub fn aggregate(articles: &[Article], posts: &[Post]) -> DashboardSummary {
    let mut sentiment = count_sentiments(articles);
    for post in posts {
        sentiment.record(post.sentiment);
    }

    let mut by_category = HashMap::new();
    for article in articles {
        *by_category.entry(article.category).or_insert(0) += 1;
    }

    let mut by_platform = HashMap::new();
    for post in posts {
        *by_platform.entry(post.platform).or_insert(0) += 1;
    }

    let summary = DashboardSummary {
        total: articles.len() + posts.len(),
        sentiment,
        by_category,
        by_platform,
    };

    debug!(
        "Aggregated {} items: {} categories, {} platforms",
        summary.total,
        summary.by_category.len(),
        summary.by_platform.len()
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyzing_items_fold_into_the_unclassified_bucket() {
        let counts = SentimentCounts::tally([
            Sentiment::POSITIVE,
            Sentiment::POSITIVE,
            Sentiment::NEGATIVE,
            Sentiment::Unclassified,
            Sentiment::Analyzing,
        ]);
        assert_eq!(counts.positive, 2);
        assert_eq!(counts.negative, 1);
        assert_eq!(counts.neutral, 0);
        assert_eq!(counts.unclassified_display(), 2);
        assert_eq!(counts.total(), 5);
    }

    #[test]
    fn distribution_skips_empty_buckets() {
        let summary = DashboardSummary {
            total: 2,
            sentiment: SentimentCounts::tally([Sentiment::NEGATIVE, Sentiment::Analyzing]),
            ..DashboardSummary::default()
        };
        let names: Vec<String> = summary
            .sentiment_distribution()
            .into_iter()
            .map(|point| point.name)
            .collect();
        assert_eq!(names, vec!["Negativo", "Não Classificado"]);
    }

    #[test]
    fn metrics_are_the_four_fixed_cards() {
        let summary = DashboardSummary::default();
        let titles: Vec<&str> = summary.metrics().iter().map(|metric| metric.title).collect();
        assert_eq!(titles, vec!["Total de Itens", "Itens Positivos", "Itens Negativos", "Itens Neutros"]);
    }
}
