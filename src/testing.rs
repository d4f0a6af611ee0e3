//! Fixture helpers for exercising forms without a network: build responses
//! from HTML snippets and wrap their forms directly.

use crate::dom::Element;
use crate::errors::{BrowserError, Result};
use crate::form::Form;
use crate::response::BrowserResponse;
use crate::types::ResponseSnapshot;
use scraper::{Html, Selector};
use url::Url;

/// A 200 response carrying the given HTML, as if fetched from `url`.
pub fn response_from_html(url: &str, html: &str) -> Result<BrowserResponse> {
    let snapshot = ResponseSnapshot {
        url: Url::parse(url)?,
        status: 200,
        headers: vec![(
            "content-type".to_string(),
            "text/html; charset=utf-8".to_string(),
        )],
        body: html.as_bytes().to_vec(),
    };
    Ok(BrowserResponse::from_snapshot(snapshot))
}

/// The first form of an HTML snippet, bound to `base_url` as its page URL.
pub fn parse_form(html: &str, base_url: &str) -> Result<Form> {
    response_from_html(base_url, html)?.form("form")
}

/// The first element of an HTML snippet wrapped as a form with no page URL,
/// for exercising URL-resolution failure paths.
pub fn parse_form_without_base(html: &str) -> Result<Form> {
    let document = Html::parse_document(html);
    let selector =
        Selector::parse("body > *").map_err(|e| BrowserError::InvalidSelector(e.to_string()))?;
    let element = document
        .select(&selector)
        .next()
        .ok_or_else(|| BrowserError::FormNotFound("body > *".to_string()))?;
    Form::new(Element::from_element_ref(element), None)
}
