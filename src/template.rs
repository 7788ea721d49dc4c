//! Query template interpolation
//!
//! Handles `:name:` placeholders in GraphQL query templates, e.g.
//! `createdAtMin: ":fromdate:"`. Values are substituted literally.

use crate::error::{Error, Result};
use crate::window::Window;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Regex for matching placeholders: :name:
static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":([a-z][a-z_]*):").expect("placeholder regex is valid"));

/// Lower window bound
pub const FROM_DATE: &str = "fromdate";
/// Upper window bound
pub const TO_DATE: &str = "todate";
/// Pagination cursor (empty for the first page)
pub const CURSOR: &str = "cursor";
/// Partner app id
pub const APP_ID: &str = "app_id";

/// Values available to a query template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateContext {
    vars: BTreeMap<String, String>,
}

impl TemplateContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Builder-style variable setter
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Set the window bounds
    pub fn set_window(&mut self, window: &Window) -> &mut Self {
        self.set(FROM_DATE, window.from_bound());
        self.set(TO_DATE, window.to_bound())
    }

    /// Set the pagination cursor
    pub fn set_cursor(&mut self, cursor: &str) -> &mut Self {
        self.set(CURSOR, cursor)
    }

    /// Get a variable
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }
}

/// Names of all placeholders used in a template, in order of first appearance
pub fn placeholders(template: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for cap in PLACEHOLDER_REGEX.captures_iter(template) {
        let name = cap[1].to_string();
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

/// Render a template with the given context
pub fn render(template: &str, ctx: &TemplateContext) -> Result<String> {
    let mut missing = Vec::new();

    let rendered = PLACEHOLDER_REGEX.replace_all(template, |cap: &regex::Captures<'_>| {
        let name = &cap[1];
        match ctx.get(name) {
            Some(value) => value.to_string(),
            None => {
                if !missing.iter().any(|m: &String| m == name) {
                    missing.push(name.to_string());
                }
                cap[0].to_string()
            }
        }
    });

    if missing.is_empty() {
        Ok(rendered.into_owned())
    } else {
        Err(Error::undefined_var(missing.join(", ")))
    }
}
