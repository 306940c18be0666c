use crate::llm_adapter::SentimentBackend;
use crate::types::{Sentiment, SentimentLabel};
use tracing::{debug, error, warn};

/// Gateway between content items and a classification backend.
///
/// `classify` never fails: backend errors degrade to `Unclassified` and labels
/// outside the known set degrade to `Neutral`. There is no retry, no cache and
/// no de-duplication of in-flight calls.
pub struct SentimentClassifier<B> {
    backend: B,
}

impl<B: SentimentBackend> SentimentClassifier<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub async fn classify(&self, text: &str) -> Sentiment {
        if text.trim().is_empty() {
            warn!("Refusing to classify empty text");
            return Sentiment::Unclassified;
        }

        match self.backend.classify_label(text).await {
            Ok(label) => {
                let sentiment = label_to_sentiment(&label);
                debug!("{} answered {:?} -> {}", self.backend.backend_name(), label, sentiment);
                sentiment
            }
            Err(e) => {
                error!("Sentiment analysis failed on {}: {}", self.backend.backend_name(), e);
                Sentiment::Unclassified
            }
        }
    }
}

/// Map a backend label onto the domain; anything unexpected counts as neutral.
pub fn label_to_sentiment(label: &str) -> Sentiment {
    match SentimentLabel::from_label(label) {
        Some(label) => Sentiment::Classified(label),
        None => {
            warn!("Unexpected sentiment label {:?}, treating as neutral", label);
            Sentiment::NEUTRAL
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClippingError, Result};
    use async_trait::async_trait;

    struct FixedBackend(std::result::Result<&'static str, ()>);

    #[async_trait]
    impl SentimentBackend for FixedBackend {
        fn backend_name(&self) -> String {
            "fixed".to_string()
        }

        async fn classify_label(&self, _text: &str) -> Result<String> {
            self.0
                .map(str::to_string)
                .map_err(|_| ClippingError::MalformedResponse("boom".to_string()))
        }
    }

    #[tokio::test]
    async fn known_labels_map_directly() {
        let classifier = SentimentClassifier::new(FixedBackend(Ok("Negativo")));
        assert_eq!(classifier.classify("texto").await, Sentiment::NEGATIVE);
    }

    #[tokio::test]
    async fn unknown_labels_degrade_to_neutral() {
        let classifier = SentimentClassifier::new(FixedBackend(Ok("Misto")));
        assert_eq!(classifier.classify("texto").await, Sentiment::NEUTRAL);
    }

    #[tokio::test]
    async fn failures_degrade_to_unclassified_every_time() {
        let classifier = SentimentClassifier::new(FixedBackend(Err(())));
        assert_eq!(classifier.classify("texto").await, Sentiment::Unclassified);
        assert_eq!(classifier.classify("texto").await, Sentiment::Unclassified);
    }

    #[tokio::test]
    async fn blank_text_never_reaches_the_backend() {
        let classifier = SentimentClassifier::new(FixedBackend(Ok("Positivo")));
        assert_eq!(classifier.classify("   ").await, Sentiment::Unclassified);
    }
}
