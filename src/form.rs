use crate::dom::Element;
use crate::errors::{BrowserError, Result};
use crate::types::{Encoding, FileUpload, RequestDescription};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use url::Url;

/// What a named form control is, computed once from its tag name and `type`
/// attribute, then matched exhaustively by the serializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    TextInput,
    RadioInput,
    CheckboxInput,
    FileInput,
    SubmitButton,
    OtherButton,
    Textarea,
    Select,
}

impl FieldKind {
    /// Classify an element, or `None` for tags that are not form controls.
    ///
    /// Inputs with an unrecognized or missing `type` classify as text.
    /// Buttons classify as submit-capable unless typed "button" or "reset".
    pub fn of(element: &Element) -> Option<FieldKind> {
        match element.tag_name.as_str() {
            "input" => {
                let kind = match element
                    .attr("type")
                    .unwrap_or("text")
                    .to_lowercase()
                    .as_str()
                {
                    "radio" => FieldKind::RadioInput,
                    "checkbox" => FieldKind::CheckboxInput,
                    "file" => FieldKind::FileInput,
                    "submit" => FieldKind::SubmitButton,
                    _ => FieldKind::TextInput,
                };
                Some(kind)
            }
            "button" => {
                let kind = match element.attr("type").map(str::to_lowercase).as_deref() {
                    Some("button") | Some("reset") => FieldKind::OtherButton,
                    _ => FieldKind::SubmitButton,
                };
                Some(kind)
            }
            "textarea" => Some(FieldKind::Textarea),
            "select" => Some(FieldKind::Select),
            _ => None,
        }
    }
}

fn is_submit_control(element: &Element) -> bool {
    FieldKind::of(element) == Some(FieldKind::SubmitButton)
}

/// An option's submitted value: its `value` attribute, falling back to its
/// text content.
fn option_value(option: &Element) -> String {
    match option.attr("value") {
        Some(value) => value.to_string(),
        None => option.text().trim().to_string(),
    }
}

fn read_file_upload(field: &str, value: &str) -> Result<FileUpload> {
    if value.is_empty() {
        return Ok(FileUpload {
            field: field.to_string(),
            file_name: String::new(),
            contents: Vec::new(),
        });
    }
    let path = Path::new(value);
    let contents = fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(FileUpload {
        field: field.to_string(),
        file_name,
        contents,
    })
}

/// A single `<form>` element plus the URL of the page that owns it.
///
/// The form exclusively owns a mutable copy of its subtree; mutators edit the
/// copy in place and never touch the document it was selected from.
/// [`Form::build_request`] serializes the current state into the exact
/// request a browser would send, and may be called repeatedly.
#[derive(Debug, Clone)]
pub struct Form {
    element: Element,
    base_url: Option<Url>,
}

impl Form {
    /// Wrap a form element. Fails with `NotAForm` for any other tag.
    pub fn new(element: Element, base_url: Option<Url>) -> Result<Self> {
        if element.tag_name != "form" {
            return Err(BrowserError::NotAForm(element.tag_name.clone()));
        }
        Ok(Self { element, base_url })
    }

    /// The wrapped element, reflecting all mutations so far.
    pub fn element(&self) -> &Element {
        &self.element
    }

    /// Overwrite the `value` attribute of the first input with this name.
    ///
    /// No type validation: setting a value on a radio or checkbox through
    /// this path is last-write-wins on the attribute.
    pub fn set_input(&mut self, name: &str, value: &str) -> Result<()> {
        let input = self
            .element
            .find_descendant_mut(&|e| e.tag_name == "input" && e.attr("name") == Some(name))
            .ok_or_else(|| BrowserError::FieldNotFound(name.to_string()))?;
        input.set_attr("value", value);
        Ok(())
    }

    /// Check the radio in group `name` whose value equals `value`.
    ///
    /// All radios in the group are unchecked first, so a `ChoiceNotFound`
    /// failure leaves the whole group unchecked rather than a stale flag.
    pub fn set_radio(&mut self, name: &str, value: &str) -> Result<()> {
        let mut seen = false;
        self.element.walk_mut(&mut |el| {
            if FieldKind::of(el) == Some(FieldKind::RadioInput) && el.attr("name") == Some(name) {
                seen = true;
                el.remove_attr("checked");
            }
        });
        if !seen {
            return Err(BrowserError::FieldNotFound(name.to_string()));
        }
        let target = self
            .element
            .find_descendant_mut(&|e| {
                FieldKind::of(e) == Some(FieldKind::RadioInput)
                    && e.attr("name") == Some(name)
                    && e.attr("value") == Some(value)
            })
            .ok_or_else(|| BrowserError::ChoiceNotFound {
                field: name.to_string(),
                value: value.to_string(),
            })?;
        target.set_attr("checked", "");
        Ok(())
    }

    /// Check every checkbox in group `name` matching one of `values`.
    ///
    /// Additive: prior selections are kept, so repeated calls accumulate.
    pub fn set_checkboxes(&mut self, name: &str, values: &[&str]) -> Result<()> {
        let mut seen = false;
        self.element.walk_mut(&mut |el| {
            if FieldKind::of(el) == Some(FieldKind::CheckboxInput) && el.attr("name") == Some(name)
            {
                seen = true;
            }
        });
        if !seen {
            return Err(BrowserError::FieldNotFound(name.to_string()));
        }
        for value in values {
            let target = self
                .element
                .find_descendant_mut(&|e| {
                    FieldKind::of(e) == Some(FieldKind::CheckboxInput)
                        && e.attr("name") == Some(name)
                        && e.attr("value") == Some(*value)
                })
                .ok_or_else(|| BrowserError::ChoiceNotFound {
                    field: name.to_string(),
                    value: value.to_string(),
                })?;
            target.set_attr("checked", "");
        }
        Ok(())
    }

    /// Replace the text content of the textarea with this name.
    pub fn set_textarea(&mut self, name: &str, value: &str) -> Result<()> {
        let textarea = self
            .element
            .find_descendant_mut(&|e| e.tag_name == "textarea" && e.attr("name") == Some(name))
            .ok_or_else(|| BrowserError::FieldNotFound(name.to_string()))?;
        textarea.set_text(value);
        Ok(())
    }

    /// Select exactly the options of `name` matching `values`.
    ///
    /// `MultipleNotAllowed` is surfaced before any mutation when more than
    /// one value is requested on a select without the `multiple` attribute.
    pub fn set_select(&mut self, name: &str, values: &[&str]) -> Result<()> {
        let select = self
            .element
            .find_descendant_mut(&|e| e.tag_name == "select" && e.attr("name") == Some(name))
            .ok_or_else(|| BrowserError::FieldNotFound(name.to_string()))?;
        if values.len() > 1 && !select.has_attr("multiple") {
            return Err(BrowserError::MultipleNotAllowed(name.to_string()));
        }
        select.walk_mut(&mut |el| {
            if el.tag_name == "option" {
                el.remove_attr("selected");
            }
        });
        for value in values {
            let option = select
                .find_descendant_mut(&|e| e.tag_name == "option" && option_value(e) == *value)
                .ok_or_else(|| BrowserError::ChoiceNotFound {
                    field: name.to_string(),
                    value: value.to_string(),
                })?;
            option.set_attr("selected", "");
        }
        Ok(())
    }

    /// The submit-capable controls of this form, in document order:
    /// input[type=submit] plus buttons typed neither "button" nor "reset".
    pub fn submits(&self) -> Vec<&Element> {
        self.element
            .descendants()
            .into_iter()
            .filter(|e| is_submit_control(e))
            .collect()
    }

    /// Pick which submit control fires when the form is serialized.
    ///
    /// With a single candidate it is used regardless of `name` (a mismatch
    /// is a caller bug and only logged). With several candidates, exactly
    /// one must carry `name`; every other candidate has its `name` attribute
    /// stripped so it drops out of the payload.
    pub fn choose_submit(&mut self, name: &str) -> Result<()> {
        let names: Vec<Option<String>> = self
            .submits()
            .iter()
            .map(|e| e.attr("name").map(str::to_string))
            .collect();
        match names.len() {
            0 => Err(BrowserError::NoSubmitButton),
            1 => {
                if names[0].as_deref() != Some(name) {
                    warn!(
                        requested = name,
                        "single submit control does not carry the requested name"
                    );
                }
                Ok(())
            }
            _ => {
                let matching = names.iter().filter(|n| n.as_deref() == Some(name)).count();
                if matching != 1 {
                    return Err(BrowserError::SubmitNotFound(format!(
                        "{name} ({matching} candidates matched)"
                    )));
                }
                self.element.walk_mut(&mut |el| {
                    if is_submit_control(el) && el.attr("name") != Some(name) {
                        el.remove_attr("name");
                    }
                });
                Ok(())
            }
        }
    }

    /// Serialize the form's current state into the request a browser would
    /// send.
    ///
    /// Walks every named control in document order, skips disabled ones, and
    /// applies per-kind contribution rules: checked-only for radios and
    /// checkboxes (value defaulting to "on"), file payloads under multipart
    /// (degrading to the filename text otherwise), text content for
    /// textareas, and selected-option resolution for selects, where a select
    /// with no selection contributes its first option and a malformed
    /// multi-selected single select contributes only the last.
    pub fn build_request(&self) -> Result<RequestDescription> {
        let method = self
            .element
            .attr("method")
            .map(str::to_lowercase)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "get".to_string());

        // An empty or absent action submits back to the page itself.
        let action = self.element.attr("action").unwrap_or("");
        let url = match &self.base_url {
            Some(base) => base.join(action)?,
            None => Url::parse(action).map_err(|_| BrowserError::NoSubmitUrl)?,
        };

        let encoding = if self
            .element
            .attr("enctype")
            .map_or(false, |e| e.eq_ignore_ascii_case("multipart/form-data"))
        {
            Encoding::Multipart
        } else {
            Encoding::UrlEncoded
        };

        let mut fields: Vec<(String, String)> = Vec::new();
        let mut files: Vec<FileUpload> = Vec::new();

        for control in self.element.descendants() {
            let kind = match FieldKind::of(control) {
                Some(kind) => kind,
                None => continue,
            };
            let name = match control.attr("name") {
                Some(name) => name,
                None => continue,
            };
            if control.has_attr("disabled") {
                continue;
            }

            match kind {
                FieldKind::RadioInput | FieldKind::CheckboxInput => {
                    if control.has_attr("checked") {
                        fields.push((
                            name.to_string(),
                            control.attr("value").unwrap_or("on").to_string(),
                        ));
                    }
                }
                FieldKind::FileInput => {
                    let value = control.attr("value").unwrap_or("");
                    if encoding == Encoding::Multipart {
                        files.push(read_file_upload(name, value)?);
                    } else {
                        // Outside multipart a file input degrades to the
                        // filename string; bytes are never transmitted.
                        fields.push((name.to_string(), value.to_string()));
                    }
                }
                FieldKind::TextInput | FieldKind::SubmitButton => {
                    fields.push((
                        name.to_string(),
                        control.attr("value").unwrap_or("").to_string(),
                    ));
                }
                FieldKind::OtherButton => {}
                FieldKind::Textarea => {
                    fields.push((name.to_string(), control.text().to_string()));
                }
                FieldKind::Select => {
                    let options: Vec<&Element> = control
                        .descendants()
                        .into_iter()
                        .filter(|e| e.tag_name == "option")
                        .collect();
                    let selected: Vec<&Element> = options
                        .iter()
                        .copied()
                        .filter(|o| o.has_attr("selected"))
                        .collect();
                    if control.has_attr("multiple") {
                        for option in &selected {
                            fields.push((name.to_string(), option_value(option)));
                        }
                    } else if let Some(last) = selected.last() {
                        fields.push((name.to_string(), option_value(last)));
                    } else if let Some(first) = options.first() {
                        fields.push((name.to_string(), option_value(first)));
                    }
                }
            }
        }

        debug!(
            method = %method,
            url = %url,
            fields = fields.len(),
            files = files.len(),
            "serialized form"
        );

        Ok(RequestDescription {
            method,
            url,
            encoding,
            fields,
            files,
        })
    }
}
