//! A minimal scriptable web-browsing library: issue HTTP requests, parse
//! HTML responses, and discover and submit forms programmatically — no
//! JavaScript, no rendering.
//!
//! The heart of the crate is the form engine: [`Form`] wraps a `<form>`
//! element, exposes mutators for its fields, and serializes the current
//! state into the exact request a real browser would send — document-order
//! fields, checked/selected semantics, submit-button disambiguation, and
//! multipart vs. urlencoded bodies.
//!
//! ```no_run
//! use formwire::Browser;
//!
//! # fn main() -> formwire::Result<()> {
//! let browser = Browser::new();
//! let page = browser.get("http://example.com/login")?;
//!
//! let mut form = page.form("form#login")?;
//! form.set_input("username", "me")?;
//! form.set_input("password", "secret")?;
//! form.choose_submit("sign-in")?;
//!
//! let next = browser.submit(&form.build_request()?)?;
//! println!("landed on {}", next.response().url);
//! # Ok(())
//! # }
//! ```

pub mod browser;
pub mod dom;
pub mod errors;
pub mod form;
pub mod response;
pub mod testing;
pub mod types;

pub use browser::Browser;
pub use dom::Element;
pub use errors::{BrowserError, Result};
pub use form::{FieldKind, Form};
pub use response::BrowserResponse;
pub use types::{Encoding, FileUpload, RequestDescription, RequestOptions, ResponseSnapshot};
