//! Built-in mock content used by the CLI and the tests.

use crate::types::{
    Article, ClientId, ClientRoster, ContentId, ContentStore, NewsCategory, Post, Result, Sentiment,
    SocialPlatform,
};
use chrono::{DateTime, TimeZone, Utc};

pub fn mock_clients() -> ClientRoster {
    ClientRoster::new(vec![
        ClientId::new("Cliente A"),
        ClientId::new("Cliente B"),
        ClientId::new("Cliente C"),
    ])
}

fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn article(
    id: &str,
    title: &str,
    summary: &str,
    full_content: Option<&str>,
    source: &str,
    journalist: Option<&str>,
    category: NewsCategory,
    client: &str,
    date: DateTime<Utc>,
    sentiment: Sentiment,
) -> Article {
    Article {
        id: ContentId::new(id),
        title: title.to_string(),
        summary: summary.to_string(),
        full_content: full_content.map(str::to_string),
        source: source.to_string(),
        journalist: journalist.map(str::to_string),
        category,
        image_url: format!("https://picsum.photos/seed/{}/400/200", id),
        client: ClientId::new(client),
        date,
        sentiment,
        link: format!("https://noticias.example.com/{}", id),
    }
}

fn post(
    id: &str,
    platform: SocialPlatform,
    content: &str,
    client: &str,
    date: DateTime<Utc>,
    sentiment: Sentiment,
    engagement: (u64, u64, u64),
) -> Post {
    let (likes, comments, shares) = engagement;
    Post {
        id: ContentId::new(id),
        platform,
        content: content.to_string(),
        client: ClientId::new(client),
        date,
        sentiment,
        likes,
        comments,
        shares,
        link: format!("https://social.example.com/{}/{}", platform.label().to_lowercase(), id),
    }
}

pub fn mock_articles() -> Vec<Article> {
    vec![
        article(
            "news-1",
            "Cliente A anuncia expansão para o Nordeste",
            "Empresa investe R$ 200 milhões em novo centro de distribuição.",
            Some("A companhia confirmou crescimento de 18% no trimestre e celebra o sucesso da nova operação logística."),
            "Valor Econômico",
            Some("Mariana Lopes"),
            NewsCategory::Business,
            "Cliente A",
            at(2024, 1, 5, 9),
            Sentiment::Unclassified,
        ),
        article(
            "news-2",
            "Falha em aplicativo gera reclamações de usuários",
            "Instabilidade durou cerca de quatro horas.",
            Some("Usuários relataram problema de acesso e a empresa admitiu a falha, prometendo compensação."),
            "G1",
            None,
            NewsCategory::Technology,
            "Cliente A",
            at(2024, 1, 18, 14),
            Sentiment::NEGATIVE,
        ),
        article(
            "news-3",
            "Cliente B patrocina campeonato estadual",
            "Acordo de três anos inclui naming rights.",
            None,
            "ESPN Brasil",
            Some("Rafael Dias"),
            NewsCategory::Sports,
            "Cliente B",
            at(2024, 2, 2, 11),
            Sentiment::POSITIVE,
        ),
        article(
            "news-4",
            "Nova política ambiental afeta setor industrial",
            "Regras entram em vigor no segundo semestre.",
            Some("Especialistas avaliam o impacto das novas metas de emissão para a indústria."),
            "Folha de S.Paulo",
            Some("Beatriz Nunes"),
            NewsCategory::Environment,
            "Cliente C",
            at(2024, 2, 10, 8),
            Sentiment::Unclassified,
        ),
        article(
            "news-5",
            "Hospital parceiro do Cliente C amplia atendimento",
            "Unidade passa a funcionar 24 horas.",
            Some("A ampliação foi recebida como conquista pela comunidade local."),
            "Estadão",
            None,
            NewsCategory::Health,
            "Cliente C",
            at(2024, 3, 1, 16),
            Sentiment::NEUTRAL,
        ),
    ]
}

pub fn mock_posts() -> Vec<Post> {
    vec![
        post(
            "social-1",
            SocialPlatform::Twitter,
            "Amei o novo app do Cliente A, excelente experiência!",
            "Cliente A",
            at(2024, 1, 6, 20),
            Sentiment::Unclassified,
            (120, 14, 9),
        ),
        post(
            "social-2",
            SocialPlatform::Facebook,
            "Péssimo atendimento na loja do centro, ninguém resolveu meu problema e ainda esperei mais de uma hora na fila.",
            "Cliente A",
            at(2024, 1, 19, 10),
            Sentiment::Unclassified,
            (35, 40, 3),
        ),
        post(
            "social-3",
            SocialPlatform::Instagram,
            "Bastidores do campeonato com o time patrocinado pelo Cliente B.",
            "Cliente B",
            at(2024, 2, 3, 18),
            Sentiment::POSITIVE,
            (890, 61, 45),
        ),
        post(
            "social-4",
            SocialPlatform::LinkedIn,
            "Cliente C abre vagas para engenheiros ambientais.",
            "Cliente C",
            at(2024, 2, 12, 9),
            Sentiment::Unclassified,
            (210, 12, 30),
        ),
    ]
}

/// Store preloaded with the mock dataset.
pub fn mock_store() -> Result<ContentStore> {
    Ok(ContentStore::new(mock_clients(), mock_articles(), mock_posts())?)
}
