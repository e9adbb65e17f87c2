use crate::app::domain::correction::CorrectionResult;
use crate::app::domain::settings::SpellCheckConfig;
use crate::app::infrastructure::error::{AppError, Result};

/// Anything that can look at a document and suggest corrections.
pub trait CorrectionSource {
    fn check(&self, text: &str) -> Result<CorrectionResult>;
}

/// TextGears over RapidAPI: a form-encoded POST carrying the whole text.
#[derive(Debug, Clone)]
pub struct HttpCorrectionSource {
    endpoint: String,
    api_host: String,
    api_key: String,
    timeout_secs: Option<u64>,
}

impl HttpCorrectionSource {
    /// Fails with `MissingApiKey` when neither the settings nor the
    /// environment provide a credential.
    pub fn from_config(config: &SpellCheckConfig) -> Result<Self> {
        let api_key = config.resolved_api_key().ok_or(AppError::MissingApiKey)?;
        Ok(Self {
            endpoint: config.endpoint.clone(),
            api_host: config.api_host.clone(),
            api_key,
            timeout_secs: config.timeout_secs,
        })
    }

    fn request(&self, text: &str) -> minreq::Request {
        let request = minreq::post(&self.endpoint)
            .with_header("content-type", "application/x-www-form-urlencoded")
            .with_header("X-RapidAPI-Key", self.api_key.as_str())
            .with_header("X-RapidAPI-Host", self.api_host.as_str())
            .with_body(encode_form(text));
        match self.timeout_secs {
            Some(secs) => request.with_timeout(secs),
            None => request,
        }
    }
}

impl CorrectionSource for HttpCorrectionSource {
    fn check(&self, text: &str) -> Result<CorrectionResult> {
        let response = self.request(text).send()?;

        if !(200..300).contains(&response.status_code) {
            return Err(AppError::HttpStatus {
                code: response.status_code,
                reason: response.reason_phrase.clone(),
            });
        }

        let data: serde_json::Value = serde_json::from_str(response.as_str()?)?;
        tracing::debug!(response = %data, "correction API response");
        Ok(CorrectionResult::from_response(data))
    }
}

/// `text=<percent-encoded document>`
pub fn encode_form(text: &str) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("text", text)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_form_plain() {
        assert_eq!(encode_form("hello"), "text=hello");
    }

    #[test]
    fn test_encode_form_escapes_reserved_characters() {
        assert_eq!(encode_form("a b&c=d"), "text=a+b%26c%3Dd");
        assert_eq!(encode_form("line1\nline2"), "text=line1%0Aline2");
    }

    #[test]
    fn test_encode_form_unicode() {
        assert_eq!(encode_form("é"), "text=%C3%A9");
    }

    #[test]
    fn test_encode_form_empty() {
        assert_eq!(encode_form(""), "text=");
    }

    #[test]
    fn test_from_config_copies_fields() {
        let config = SpellCheckConfig {
            endpoint: "http://127.0.0.1:9/correct".to_string(),
            api_host: "example.test".to_string(),
            api_key: Some("k".to_string()),
            timeout_secs: Some(3),
        };
        // The environment may also carry a key; either way one is present.
        let source = HttpCorrectionSource::from_config(&config).unwrap();
        assert_eq!(source.endpoint, "http://127.0.0.1:9/correct");
        assert_eq!(source.api_host, "example.test");
        assert!(!source.api_key.is_empty());
        assert_eq!(source.timeout_secs, Some(3));
    }

    #[test]
    fn test_unreachable_endpoint_is_transport_error() {
        let config = SpellCheckConfig {
            // Port 9 (discard) is closed on any sane test host.
            endpoint: "http://127.0.0.1:9/correct".to_string(),
            api_key: Some("k".to_string()),
            timeout_secs: Some(2),
            ..Default::default()
        };
        let source = HttpCorrectionSource::from_config(&config).unwrap();
        let err = source.check("teh").unwrap_err();
        assert!(matches!(err, AppError::Transport(_)));
    }
}
