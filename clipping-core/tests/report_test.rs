mod common;

use chrono::NaiveDate;
use clipping_core::document::{DocumentWriter, TextDocumentWriter, TextStyle};
use clipping_core::report::{compile_report, ReportRequest};
use common::*;

fn day(year: i32, month: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, d)
}

fn article_ids(request: &ReportRequest, articles: &[Article]) -> Vec<String> {
    let document = compile_report(articles, &[], request, ReportLayout::default());
    document.article_ids.iter().map(|id| id.to_string()).collect()
}

#[test]
fn test_january_report_over_three_articles() {
    init_tracing();
    let request = ReportRequest::new(day(2024, 1, 1), day(2024, 1, 31), vec![]);
    assert_eq!(article_ids(&request, &three_articles()), vec!["a1", "a2"]);
}

#[test]
fn test_end_day_is_inclusive_until_midnight() {
    let articles = vec![
        article("midnight", CLIENT_A, utc(2024, 1, 31, 0)),
        article("late", CLIENT_A, utc(2024, 1, 31, 23)),
        article("next-day", CLIENT_A, utc(2024, 2, 1, 0)),
    ];
    let request = ReportRequest::new(None, day(2024, 1, 31), vec![]);
    assert_eq!(article_ids(&request, &articles), vec!["midnight", "late"]);
}

#[test]
fn test_start_bound_is_inclusive() {
    let articles = vec![
        article("before", CLIENT_A, utc(2023, 12, 31, 23)),
        article("first", CLIENT_A, utc(2024, 1, 1, 0)),
    ];
    let request = ReportRequest::new(day(2024, 1, 1), None, vec![]);
    assert_eq!(article_ids(&request, &articles), vec!["first"]);
}

#[test]
fn test_client_selection() {
    let articles = three_articles();

    let everyone = ReportRequest::new(None, None, vec![]);
    assert_eq!(article_ids(&everyone, &articles), vec!["a1", "a2", "a3"]);

    let only_b = ReportRequest::new(None, None, vec![ClientId::new(CLIENT_B)]);
    assert_eq!(article_ids(&only_b, &articles), vec!["a3"]);
}

#[test]
fn test_empty_sections_are_omitted() {
    let request = ReportRequest::new(day(2030, 1, 1), None, vec![]);
    let document = compile_report(&three_articles(), &[], &request, ReportLayout::default());

    let texts: Vec<&str> = document.texts().collect();
    assert!(texts.contains(&"Total de Itens: 0"));
    assert!(!texts.contains(&"Notícias"));
    assert!(!texts.contains(&"Mídias Sociais"));
    assert_eq!(document.page_count(), 1);
}

#[test]
fn test_layout_header_summary_and_blocks() {
    let mut articles = three_articles();
    articles[0].sentiment = Sentiment::POSITIVE;
    let long = "x".repeat(150);
    let posts = vec![post("p1", CLIENT_A, utc(2024, 1, 10, 12), &long)];

    let request = ReportRequest::new(day(2024, 1, 1), day(2024, 1, 31), vec![ClientId::new(CLIENT_A)]);
    let document = compile_report(&articles, &posts, &request, ReportLayout::default());
    let texts: Vec<&str> = document.texts().collect();

    assert_eq!(texts[0], "Relatório de Clipping");
    assert!(texts.contains(&"Período: 2024-01-01 a 2024-01-31"));
    assert!(texts.contains(&"Clientes: Cliente A"));
    assert!(texts.contains(&"Total de Itens: 3"));
    assert!(texts.contains(&"Sentimento Positivo: 1"));
    assert!(texts.contains(&"Título: Matéria a1"));
    assert!(texts.contains(&"Fonte: Agência Brasil | Data: 01/01/2024 | Sentimento: Positivo | Cliente: Cliente A"));

    let excerpt = format!("Conteúdo: {}...", "x".repeat(100));
    assert!(texts.contains(&excerpt.as_str()));
    assert!(texts.contains(&"Engajamento: 10 curtidas | 2 comentários | 1 compartilhamentos"));

    assert_eq!(document.suggested_name(), "Report_2024-01-01_2024-01-31");
    assert_eq!(document.pages[0].lines[0].style, TextStyle::Title);
}

#[test]
fn test_long_reports_paginate_without_overflow() {
    let layout = ReportLayout::default();
    let articles: Vec<Article> = (0..40)
        .map(|i| article(&format!("n{}", i), CLIENT_A, utc(2024, 1, 1 + (i % 28), 0)))
        .collect();

    let document = compile_report(&articles, &[], &ReportRequest::default(), layout);

    assert!(document.page_count() > 1);
    for (index, page) in document.pages.iter().enumerate() {
        assert_eq!(page.number, index + 1);
        for line in &page.lines {
            assert!(line.y <= layout.page_height - layout.margin, "line at {} overflows", line.y);
        }
    }
    // Every article block starts with its title line on the same page as its link
    for page in &document.pages {
        let titles = page.lines.iter().filter(|l| l.text.starts_with("Título:")).count();
        let links = page.lines.iter().filter(|l| l.text.starts_with("Link:")).count();
        assert_eq!(titles, links);
    }
    assert_eq!(document.article_ids.len(), 40);
}

#[test]
fn test_compiling_does_not_touch_inputs() {
    let articles = three_articles();
    let snapshot = articles.clone();
    let _ = compile_report(&articles, &[], &ReportRequest::default(), ReportLayout::default());
    assert_eq!(articles, snapshot);
}

#[test]
fn test_text_writer_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let request = ReportRequest::new(day(2024, 1, 1), day(2024, 1, 31), vec![]);
    let document = compile_report(&three_articles(), &[], &request, ReportLayout::default());

    let path = TextDocumentWriter.write_to(&document, dir.path()).unwrap();
    assert!(path.ends_with("Report_2024-01-01_2024-01-31.txt"));

    let contents = std::fs::read_to_string(path).unwrap();
    assert!(contents.starts_with("RELATÓRIO DE CLIPPING"));
    assert!(contents.contains("Título: Matéria a2"));
    assert!(!contents.contains("Título: Matéria a3"));
}
