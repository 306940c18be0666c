#![allow(dead_code)]

// Re-export commonly used test types
pub use clipping_core::types::*;

use chrono::{DateTime, TimeZone, Utc};

pub const CLIENT_A: &str = "Cliente A";
pub const CLIENT_B: &str = "Cliente B";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_test_writer()
        .try_init();
}

pub fn utc(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}

pub fn roster() -> ClientRoster {
    ClientRoster::new(vec![ClientId::new(CLIENT_A), ClientId::new(CLIENT_B)])
}

pub fn article(id: &str, client: &str, date: DateTime<Utc>) -> Article {
    Article {
        id: ContentId::new(id),
        title: format!("Matéria {}", id),
        summary: "Resumo da matéria".to_string(),
        full_content: Some(format!("Conteúdo completo da matéria {}", id)),
        source: "Agência Brasil".to_string(),
        journalist: None,
        category: NewsCategory::General,
        image_url: String::new(),
        client: ClientId::new(client),
        date,
        sentiment: Sentiment::Unclassified,
        link: format!("https://example.com/{}", id),
    }
}

pub fn post(id: &str, client: &str, date: DateTime<Utc>, content: &str) -> Post {
    Post {
        id: ContentId::new(id),
        platform: SocialPlatform::Twitter,
        content: content.to_string(),
        client: ClientId::new(client),
        date,
        sentiment: Sentiment::Unclassified,
        likes: 10,
        comments: 2,
        shares: 1,
        link: format!("https://twitter.com/status/{}", id),
    }
}

/// The three-article set used throughout: Jan 1 and Jan 15 for A, Feb 1 for B.
pub fn three_articles() -> Vec<Article> {
    vec![
        article("a1", CLIENT_A, utc(2024, 1, 1, 0)),
        article("a2", CLIENT_A, utc(2024, 1, 15, 0)),
        article("a3", CLIENT_B, utc(2024, 2, 1, 0)),
    ]
}

pub fn ids<T: ContentItem>(items: &[T]) -> Vec<String> {
    items.iter().map(|item| item.id().to_string()).collect()
}
