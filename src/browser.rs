use crate::errors::{BrowserError, Result};
use crate::response::BrowserResponse;
use crate::types::{Encoding, RequestDescription, RequestOptions};
use reqwest::blocking::{multipart, Client, RequestBuilder, Response};
use reqwest::Method;
use tracing::debug;

/// Thin orchestration layer over the blocking HTTP client.
///
/// Issues requests, fails on non-2xx statuses, and wraps responses in
/// [`BrowserResponse`]. Redirect handling, TLS, and connection pooling are
/// the client's business; no retry policy is layered on top.
#[derive(Debug, Clone)]
pub struct Browser {
    client: Client,
}

impl Default for Browser {
    fn default() -> Self {
        Self::new()
    }
}

impl Browser {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Use a preconfigured client (proxies, cookie store, timeouts).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    pub fn get(&self, url: &str) -> Result<BrowserResponse> {
        self.request("get", url, RequestOptions::default())
    }

    /// POST a urlencoded body of `(name, value)` pairs.
    pub fn post(&self, url: &str, data: &[(String, String)]) -> Result<BrowserResponse> {
        debug!(url, pairs = data.len(), "post");
        let response = self.client.post(url).form(&data).send()?;
        self.wrap(response)
    }

    /// Issue a request with an arbitrary method.
    pub fn request(
        &self,
        method: &str,
        url: &str,
        options: RequestOptions,
    ) -> Result<BrowserResponse> {
        debug!(method, url, "request");
        let method = parse_method(method)?;
        let mut builder = self.client.request(method, url);
        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }
        for (name, value) in &options.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &options.body {
            builder = builder.form(body);
        }
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let response = builder.send()?;
        self.wrap(response)
    }

    /// Perform a serialized form submission, closing the loop from
    /// [`crate::Form::build_request`] back into the session.
    pub fn submit(&self, description: &RequestDescription) -> Result<BrowserResponse> {
        debug!(
            method = %description.method,
            url = %description.url,
            "submitting form"
        );
        let response = self.prepare(description)?.send()?;
        self.wrap(response)
    }

    /// Turn a request description into a concrete request: GET routes the
    /// pairs into query parameters; otherwise they become a urlencoded body
    /// or multipart parts. Multipart framing is kept even with an empty
    /// file set.
    pub(crate) fn prepare(&self, description: &RequestDescription) -> Result<RequestBuilder> {
        let method = parse_method(&description.method)?;
        let mut builder = self.client.request(method, description.url.clone());
        if description.method.eq_ignore_ascii_case("get") {
            builder = builder.query(&description.fields);
        } else {
            match description.encoding {
                Encoding::UrlEncoded => {
                    builder = builder.form(&description.fields);
                }
                Encoding::Multipart => {
                    let mut form = multipart::Form::new();
                    for (name, value) in &description.fields {
                        form = form.text(name.clone(), value.clone());
                    }
                    for file in &description.files {
                        let part = multipart::Part::bytes(file.contents.clone())
                            .file_name(file.file_name.clone());
                        form = form.part(file.field.clone(), part);
                    }
                    builder = builder.multipart(form);
                }
            }
        }
        Ok(builder)
    }

    fn wrap(&self, response: Response) -> Result<BrowserResponse> {
        let status = response.status();
        if !status.is_success() {
            return Err(BrowserError::HttpStatus {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }
        BrowserResponse::from_reqwest(response)
    }
}

fn parse_method(method: &str) -> Result<Method> {
    Method::from_bytes(method.to_uppercase().as_bytes())
        .map_err(|_| BrowserError::InvalidMethod(method.to_string()))
}
