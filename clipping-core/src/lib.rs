pub mod types;
pub mod llm_adapter;
pub mod classifier;
pub mod filter;
pub mod aggregator;
pub mod report;
pub mod document;
pub mod session;
pub mod fixtures;
pub mod utils;

pub use types::*;
pub use llm_adapter::{GeminiBackend, MockSentimentBackend, SentimentBackend};
pub use classifier::SentimentClassifier;
pub use filter::{filter_items, Feed, FilterCriteria, FilterOutcome};
pub use aggregator::{aggregate, DashboardSummary, SentimentCounts};
pub use report::{compile_report, ReportRequest};
pub use document::{
    DocumentWriter, JsonDocumentWriter, PdfDocumentWriter, ReportDocument, TextDocumentWriter,
};
pub use session::Session;
