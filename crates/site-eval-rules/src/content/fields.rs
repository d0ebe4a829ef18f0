//! Field-level checks shared by the content schemas.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use site_eval_core::{Frontmatter, Value};

use super::FieldError;

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Returns true if `raw` is a date in one of the accepted forms.
#[must_use]
pub fn is_date(raw: &str) -> bool {
    let raw = raw.trim();
    is_year_or_month(raw)
        || DateTime::parse_from_rfc3339(raw).is_ok()
        || DateTime::parse_from_rfc2822(raw).is_ok()
        || DATE_FORMATS
            .iter()
            .any(|f| NaiveDate::parse_from_str(raw, f).is_ok())
        || DATETIME_FORMATS
            .iter()
            .any(|f| NaiveDateTime::parse_from_str(raw, f).is_ok())
}

/// `YYYY` or `YYYY-MM`.
fn is_year_or_month(raw: &str) -> bool {
    match raw.split_once('-') {
        None => raw.len() == 4 && raw.bytes().all(|b| b.is_ascii_digit()),
        Some((year, month)) => {
            year.len() == 4
                && month.len() == 2
                && NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d").is_ok()
        }
    }
}

/// Returns true if `raw` is an absolute http(s) URL with a host.
#[must_use]
pub fn is_absolute_url(raw: &str) -> bool {
    let Some(rest) = raw
        .strip_prefix("https://")
        .or_else(|| raw.strip_prefix("http://"))
    else {
        return false;
    };
    let host = rest.split(['/', '?', '#']).next().unwrap_or("");
    !host.is_empty() && !raw.contains(char::is_whitespace)
}

/// Collects field errors for one frontmatter header.
pub struct Fields<'a> {
    fm: &'a Frontmatter,
    errors: Vec<FieldError>,
}

impl<'a> Fields<'a> {
    pub fn new(fm: &'a Frontmatter) -> Self {
        Self {
            fm,
            errors: Vec::new(),
        }
    }

    pub fn finish(self) -> Vec<FieldError> {
        self.errors
    }

    fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    fn get(&self, field: &str) -> Option<&'a Value> {
        self.fm.lookup(field)
    }

    /// A string of at least `min` (and at most `max`) characters.
    pub fn required_string(&mut self, field: &str, min: usize, max: Option<usize>) {
        let value = self.get(field).and_then(Value::as_str);
        self.check_text(field, value, min, max);
    }

    fn check_text(&mut self, field: &str, value: Option<&str>, min: usize, max: Option<usize>) {
        let length = value.map_or(0, |s| s.chars().count());
        if value.is_none() || length < min.max(1) {
            let message = match (min, max) {
                (0 | 1, _) => "Required string".to_string(),
                (min, Some(max)) => format!("Required string ({min}-{max} chars)"),
                (min, None) => format!("Required string ({min}+ chars)"),
            };
            self.push(field, message);
        } else if let Some(max) = max.filter(|max| length > *max) {
            self.push(field, format!("Too long: {length}/{max} chars"));
        }
    }

    /// An optional string.
    pub fn optional_string(&mut self, field: &str) {
        if let Some(value) = self.get(field) {
            if value.as_str().is_none() {
                self.push(field, "Must be a string");
            }
        }
    }

    /// An optional boolean.
    pub fn optional_bool(&mut self, field: &str) {
        if let Some(value) = self.get(field) {
            if value.as_bool().is_none() {
                self.push(field, "Must be a boolean");
            }
        }
    }

    /// A parseable date, given as a string or a bare number such as a
    /// year. Optional dates are only checked when present and not null.
    pub fn date(&mut self, field: &str, required: bool) {
        let valid = match self.get(field) {
            None | Some(Value::Null) => {
                if required {
                    self.push(field, "Required date");
                }
                return;
            }
            Some(Value::String(raw)) => is_date(raw),
            Some(Value::Number(n)) => is_date(&n.to_string()),
            Some(_) => false,
        };
        if !valid {
            self.push(field, "Invalid date format");
        }
    }

    /// A string from a fixed list.
    pub fn one_of(&mut self, field: &str, allowed: &[String]) {
        let value = self.get(field).and_then(Value::as_str);
        if !value.is_some_and(|v| allowed.iter().any(|a| a == v)) {
            self.push(field, format!("Must be one of: {}", allowed.join(", ")));
        }
    }

    /// An optional list of strings; element errors are reported as `field[i]`.
    pub fn string_list(&mut self, field: &str) {
        let Some(value) = self.get(field) else {
            return;
        };
        let Some(items) = value.as_list() else {
            self.push(field, "Must be an array of strings");
            return;
        };
        for (i, item) in items.iter().enumerate() {
            if item.as_str().is_none() {
                self.push(format!("{field}[{i}]"), "Must be a string");
            }
        }
    }

    /// The required `hero` block with non-empty `title` and `lead`.
    pub fn hero(&mut self) {
        match self.get("hero") {
            None => self.push("hero", "Required object with title and lead"),
            Some(value) if value.as_map().is_none() => self.push("hero", "Must be an object"),
            Some(_) => {
                self.required_string("hero.title", 1, None);
                self.required_string("hero.lead", 1, None);
            }
        }
    }

    /// The optional `seo` block; `seo.canonical` must be an absolute URL.
    pub fn seo(&mut self) {
        let Some(value) = self.get("seo") else {
            return;
        };
        if value.as_map().is_none() {
            self.push("seo", "Must be an object");
            return;
        }
        if let Some(canonical) = self.get("seo.canonical") {
            if !canonical.as_str().is_some_and(is_absolute_url) {
                self.push("seo.canonical", "Must be an absolute URL");
            }
        }
        self.optional_bool("seo.noIndex");
    }

    /// The optional `metrics` list of `{label, value}` objects.
    pub fn metrics(&mut self) {
        let Some(value) = self.get("metrics") else {
            return;
        };
        let Some(items) = value.as_list() else {
            self.push("metrics", "Must be an array");
            return;
        };

        for (i, item) in items.iter().enumerate() {
            let Some(entry) = item.as_map() else {
                self.push(format!("metrics[{i}]"), "Must be an object with label and value");
                continue;
            };

            let label = entry.get("label").and_then(Value::as_str);
            self.check_text(&format!("metrics[{i}].label"), label, 1, None);

            let valid_value = match entry.get("value") {
                Some(Value::String(s)) => !s.is_empty(),
                Some(Value::Number(_)) => true,
                _ => false,
            };
            if !valid_value {
                self.push(format!("metrics[{i}].value"), "Required string or number");
            }
        }
    }
}
