//! Web App link: the URL a keyboard button opens inside Telegram's embedded browser.

use femida_core::{FemidaError, Keyboard, Result};
use reqwest::Url;
use teloxide::types::WebAppInfo;

/// Validated Web App URL. Telegram only opens Web Apps served over https.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebAppLink {
    url: Url,
}

impl WebAppLink {
    pub fn parse(raw: &str) -> Result<Self> {
        let url = Url::parse(raw.trim())
            .map_err(|e| FemidaError::Config(format!("WEB_APP_URL is not a valid URL ({}): {}", e, raw)))?;
        if url.scheme() != "https" {
            return Err(FemidaError::Config(format!(
                "WEB_APP_URL must use https, got {}: {}",
                url.scheme(),
                raw
            )));
        }
        Ok(Self { url })
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Reply keyboard with one button labelled `button_text` that opens this link.
    pub fn keyboard(&self, button_text: &str) -> Keyboard {
        Keyboard::WebApp {
            text: button_text.to_string(),
            url: self.as_str().to_string(),
        }
    }

    pub fn info(&self) -> WebAppInfo {
        WebAppInfo {
            url: self.url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_https() {
        let link = WebAppLink::parse("https://vk.com/").unwrap();
        assert_eq!(link.as_str(), "https://vk.com/");
    }

    #[test]
    fn test_parse_trims_and_normalizes() {
        let link = WebAppLink::parse("  https://hape30.github.io/Femida-last-release ").unwrap();
        assert_eq!(link.url().host_str(), Some("hape30.github.io"));
    }

    #[test]
    fn test_parse_rejects_http_and_garbage() {
        assert!(matches!(
            WebAppLink::parse("http://vk.com/"),
            Err(FemidaError::Config(_))
        ));
        assert!(WebAppLink::parse("not a url").is_err());
        assert!(WebAppLink::parse("").is_err());
    }

    #[test]
    fn test_keyboard_carries_url_and_text() {
        let link = WebAppLink::parse("https://vk.com/").unwrap();
        assert_eq!(
            link.keyboard("Open"),
            Keyboard::WebApp {
                text: "Open".to_string(),
                url: "https://vk.com/".to_string(),
            }
        );
        assert_eq!(link.info().url.as_str(), "https://vk.com/");
    }
}
