use crate::aggregator::{count_sentiments, SentimentCounts};
use crate::document::{Align, Line, Page, ReportDocument, TextStyle};
use crate::types::{Article, ClientId, ContentItem, Post, ReportLayout, SentimentLabel};
use crate::utils::text::truncate_with_ellipsis;
use crate::utils::time::{end_of_day_exclusive, format_date_br, start_of_day};
use chrono::NaiveDate;
use tracing::{debug, info};
use uuid::Uuid;

const REPORT_TITLE: &str = "Relatório de Clipping";
const REPORT_SUBTITLE: &str = "Clipping App";
const POST_EXCERPT_CHARS: usize = 100;

/// What to put in a report. Omitted bounds are unconstrained; an empty client
/// list means every client.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportRequest {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub clients: Vec<ClientId>,
}

impl ReportRequest {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>, clients: Vec<ClientId>) -> Self {
        Self { start, end, clients }
    }

    /// Date and client predicate shared by both sections. The end day is
    /// inclusive through its last instant.
    pub fn includes<T: ContentItem>(&self, item: &T) -> bool {
        let date = item.date();
        let after_start = self.start.map_or(true, |start| date >= start_of_day(start));
        let before_end = self.end.map_or(true, |end| date < end_of_day_exclusive(end));
        let for_client = self.clients.is_empty() || self.clients.contains(item.client());
        after_start && before_end && for_client
    }

    pub fn suggested_name(&self) -> String {
        format!("Report_{}_{}", iso_or_empty(self.start), iso_or_empty(self.end))
    }

    fn period_line(&self) -> String {
        format!(
            "Período: {} a {}",
            self.start.map_or_else(|| "Início".to_string(), |d| d.to_string()),
            self.end.map_or_else(|| "Fim".to_string(), |d| d.to_string())
        )
    }

    fn clients_line(&self) -> String {
        if self.clients.is_empty() {
            "Clientes: Todos".to_string()
        } else {
            let names: Vec<&str> = self.clients.iter().map(ClientId::as_str).collect();
            format!("Clientes: {}", names.join(", "))
        }
    }
}

fn iso_or_empty(date: Option<NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_default()
}

/// Running vertical position over a growing list of pages.
struct PageCursor {
    layout: ReportLayout,
    pages: Vec<Page>,
    y: f32,
}

impl PageCursor {
    fn new(layout: ReportLayout) -> Self {
        Self {
            layout,
            pages: vec![Page {
                number: 1,
                lines: Vec::new(),
            }],
            y: layout.margin,
        }
    }

    /// Start a new page unless a full block still fits on this one.
    fn reserve_block(&mut self) {
        if self.y + self.layout.block_threshold > self.layout.page_height - self.layout.margin {
            let number = self.pages.len() + 1;
            debug!("Starting report page {}", number);
            self.pages.push(Page {
                number,
                lines: Vec::new(),
            });
            self.y = self.layout.margin;
        }
    }

    fn emit(&mut self, text: impl Into<String>, style: TextStyle, advance: f32) {
        self.emit_aligned(text, style, Align::Left, advance);
    }

    fn emit_aligned(&mut self, text: impl Into<String>, style: TextStyle, align: Align, advance: f32) {
        let x = match align {
            Align::Left => self.layout.margin,
            Align::Center => self.layout.page_width / 2.0,
        };
        let line = Line {
            x,
            y: self.y,
            text: text.into(),
            style,
            align,
            max_width: self.layout.page_width - 2.0 * self.layout.margin,
        };
        if let Some(page) = self.pages.last_mut() {
            page.lines.push(line);
        }
        self.y += advance;
    }

    fn finish(self) -> Vec<Page> {
        self.pages
    }
}

/// Select the items a request covers and lay them out page by page.
///
/// Pure apart from the random document id: inputs are only read, and writing
/// the result somewhere is left to a `DocumentWriter`.
pub fn compile_report(
    articles: &[Article],
    posts: &[Post],
    request: &ReportRequest,
    layout: ReportLayout,
) -> ReportDocument {
    let news: Vec<&Article> = articles.iter().filter(|a| request.includes(*a)).collect();
    let social: Vec<&Post> = posts.iter().filter(|p| request.includes(*p)).collect();

    let mut totals = count_sentiments(news.iter().copied());
    for post in &social {
        totals.record(post.sentiment);
    }

    let mut cursor = PageCursor::new(layout);
    write_header(&mut cursor, request);
    write_summary(&mut cursor, &totals);

    if !news.is_empty() {
        cursor.reserve_block();
        cursor.emit("Notícias", TextStyle::Heading, 10.0);
        for article in &news {
            write_article(&mut cursor, article);
        }
    }

    if !social.is_empty() {
        cursor.reserve_block();
        cursor.emit("Mídias Sociais", TextStyle::Heading, 10.0);
        for post in &social {
            write_post(&mut cursor, post);
        }
    }

    let document = ReportDocument {
        id: Uuid::new_v4(),
        name: request.suggested_name(),
        totals,
        article_ids: news.iter().map(|a| a.id.clone()).collect(),
        post_ids: social.iter().map(|p| p.id.clone()).collect(),
        pages: cursor.finish(),
    };

    info!(
        "Compiled report {}: {} articles, {} posts, {} pages",
        document.name,
        document.article_ids.len(),
        document.post_ids.len(),
        document.page_count()
    );
    document
}

fn write_header(cursor: &mut PageCursor, request: &ReportRequest) {
    cursor.emit_aligned(REPORT_TITLE, TextStyle::Title, Align::Center, 10.0);
    cursor.emit_aligned(REPORT_SUBTITLE, TextStyle::Subtitle, Align::Center, 10.0);
    cursor.emit(request.period_line(), TextStyle::Body, 7.0);
    cursor.emit(request.clients_line(), TextStyle::Body, 15.0);
}

fn write_summary(cursor: &mut PageCursor, totals: &SentimentCounts) {
    cursor.emit("Métricas de Resumo", TextStyle::Heading, 10.0);
    cursor.emit(format!("Total de Itens: {}", totals.total()), TextStyle::Body, 7.0);
    cursor.emit(
        format!("Sentimento {}: {}", SentimentLabel::Positive.label(), totals.positive),
        TextStyle::Body,
        7.0,
    );
    cursor.emit(
        format!("Sentimento {}: {}", SentimentLabel::Negative.label(), totals.negative),
        TextStyle::Body,
        7.0,
    );
    cursor.emit(
        format!("Sentimento {}: {}", SentimentLabel::Neutral.label(), totals.neutral),
        TextStyle::Body,
        15.0,
    );
}

fn write_article(cursor: &mut PageCursor, article: &Article) {
    cursor.reserve_block();
    cursor.emit(format!("Título: {}", article.title), TextStyle::BodyBold, 5.0);
    cursor.emit(
        format!(
            "Fonte: {} | Data: {} | Sentimento: {} | Cliente: {}",
            article.source,
            format_date_br(article.date),
            article.sentiment,
            article.client
        ),
        TextStyle::Body,
        5.0,
    );
    cursor.emit(format!("Link: {}", article.link), TextStyle::Body, 10.0);
}

fn write_post(cursor: &mut PageCursor, post: &Post) {
    cursor.reserve_block();
    cursor.emit(format!("Plataforma: {}", post.platform), TextStyle::BodyBold, 5.0);
    cursor.emit(
        format!("Conteúdo: {}", truncate_with_ellipsis(&post.content, POST_EXCERPT_CHARS)),
        TextStyle::Body,
        5.0,
    );
    cursor.emit(
        format!(
            "Data: {} | Sentimento: {} | Cliente: {}",
            format_date_br(post.date),
            post.sentiment,
            post.client
        ),
        TextStyle::Body,
        5.0,
    );
    cursor.emit(
        format!(
            "Engajamento: {} curtidas | {} comentários | {} compartilhamentos",
            post.likes, post.comments, post.shares
        ),
        TextStyle::Body,
        5.0,
    );
    cursor.emit(format!("Link: {}", post.link), TextStyle::Body, 10.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggested_name_encodes_both_bounds() {
        let request = ReportRequest::new(
            NaiveDate::from_ymd_opt(2024, 1, 1),
            NaiveDate::from_ymd_opt(2024, 1, 31),
            vec![],
        );
        assert_eq!(request.suggested_name(), "Report_2024-01-01_2024-01-31");
        assert_eq!(ReportRequest::default().suggested_name(), "Report__");
    }

    #[test]
    fn header_lines_fall_back_to_open_bounds_and_all_clients() {
        let request = ReportRequest::default();
        assert_eq!(request.period_line(), "Período: Início a Fim");
        assert_eq!(request.clients_line(), "Clientes: Todos");

        let request = ReportRequest::new(None, None, vec![ClientId::new("A"), ClientId::new("B")]);
        assert_eq!(request.clients_line(), "Clientes: A, B");
    }

    #[test]
    fn cursor_breaks_before_a_block_that_would_not_fit() {
        let layout = ReportLayout::default();
        let mut cursor = PageCursor::new(layout);
        cursor.y = layout.page_height - layout.margin - layout.block_threshold + 1.0;
        cursor.reserve_block();
        assert_eq!(cursor.pages.len(), 2);
        assert_eq!(cursor.y, layout.margin);

        cursor.reserve_block();
        assert_eq!(cursor.pages.len(), 2);
    }
}
