use crate::dom::Element;
use crate::errors::{BrowserError, Result};
use crate::form::Form;
use crate::types::ResponseSnapshot;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// One HTTP response bound to a lazily-parsed HTML document.
///
/// The wrapper trades CPU for isolation: [`BrowserResponse::document`]
/// re-parses the body on every access and [`BrowserResponse::response`]
/// hands out a clone, so nothing a caller does can corrupt shared state.
#[derive(Debug, Clone)]
pub struct BrowserResponse {
    snapshot: ResponseSnapshot,
}

impl BrowserResponse {
    pub(crate) fn from_reqwest(response: reqwest::blocking::Response) -> Result<Self> {
        let url = response.url().clone();
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.bytes()?.to_vec();
        Ok(Self {
            snapshot: ResponseSnapshot {
                url,
                status,
                headers,
                body,
            },
        })
    }

    /// Wrap an already-materialized response, e.g. a test fixture.
    pub fn from_snapshot(snapshot: ResponseSnapshot) -> Self {
        Self { snapshot }
    }

    /// An isolated copy of the underlying response.
    pub fn response(&self) -> ResponseSnapshot {
        self.snapshot.clone()
    }

    /// Parse the body into a fresh document. Every call re-parses, so
    /// independent accesses never alias each other.
    pub fn document(&self) -> Html {
        Html::parse_document(&String::from_utf8_lossy(&self.snapshot.body))
    }

    /// Resolve a possibly-relative URL against this response's final URL
    /// (after redirects).
    pub fn absolute_url(&self, relative: &str) -> Result<Url> {
        Ok(self.snapshot.url.join(relative)?)
    }

    /// Wrap a form element selected from [`BrowserResponse::document`],
    /// binding it to this response's final URL. Fails with `NotAForm` for
    /// any other tag.
    pub fn select_form(&self, element: ElementRef<'_>) -> Result<Form> {
        Form::new(
            Element::from_element_ref(element),
            Some(self.snapshot.url.clone()),
        )
    }

    /// Convenience: select the first element matching a CSS selector and
    /// wrap it as a form.
    pub fn form(&self, selector: &str) -> Result<Form> {
        let parsed = Selector::parse(selector)
            .map_err(|e| BrowserError::InvalidSelector(e.to_string()))?;
        let document = self.document();
        let element = document
            .select(&parsed)
            .next()
            .ok_or_else(|| BrowserError::FormNotFound(selector.to_string()))?;
        self.select_form(element)
    }
}
