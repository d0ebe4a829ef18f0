//! Blog and case-study schemas.

use site_eval_core::{ContentConfig, Frontmatter};

use super::fields::Fields;
use super::{FieldError, Schema};

const TITLE_MAX: usize = 100;
const DESCRIPTION_MIN: usize = 20;
const DESCRIPTION_MAX: usize = 300;

/// Schema for `src/content/blog`.
#[derive(Debug, Clone)]
pub struct BlogSchema {
    categories: Vec<String>,
}

impl BlogSchema {
    /// Creates the schema with the allowed `category` values.
    #[must_use]
    pub fn new(categories: Vec<String>) -> Self {
        Self { categories }
    }

    /// Creates the schema from the `[content]` table.
    #[must_use]
    pub fn from_config(config: &ContentConfig) -> Self {
        Self::new(config.blog_categories.clone())
    }
}

impl Default for BlogSchema {
    fn default() -> Self {
        Self::from_config(&ContentConfig::default())
    }
}

impl Schema for BlogSchema {
    fn collection(&self) -> &'static str {
        "blog"
    }

    fn validate(&self, fm: &Frontmatter) -> Vec<FieldError> {
        let mut f = Fields::new(fm);
        f.required_string("title", 1, Some(TITLE_MAX));
        f.required_string("description", DESCRIPTION_MIN, Some(DESCRIPTION_MAX));
        f.required_string("author", 1, None);
        f.date("publishedAt", true);
        f.one_of("category", &self.categories);
        f.string_list("tags");
        f.hero();
        f.seo();
        f.optional_bool("draft");
        f.finish()
    }
}

/// Schema for `src/content/case-studies`.
#[derive(Debug, Clone, Default)]
pub struct CaseStudySchema {
    /// Empty means any non-empty category.
    categories: Vec<String>,
}

impl CaseStudySchema {
    /// Creates the schema. An empty `categories` list leaves `category`
    /// unrestricted.
    #[must_use]
    pub fn new(categories: Vec<String>) -> Self {
        Self { categories }
    }

    /// Creates the schema from the `[content]` table.
    #[must_use]
    pub fn from_config(config: &ContentConfig) -> Self {
        Self::new(config.case_study_categories.clone())
    }
}

impl Schema for CaseStudySchema {
    fn collection(&self) -> &'static str {
        "case-studies"
    }

    fn validate(&self, fm: &Frontmatter) -> Vec<FieldError> {
        let mut f = Fields::new(fm);
        f.required_string("title", 1, Some(TITLE_MAX));
        f.required_string("client", 1, None);
        if self.categories.is_empty() {
            f.required_string("category", 1, None);
        } else {
            f.one_of("category", &self.categories);
        }
        f.required_string("description", DESCRIPTION_MIN, Some(DESCRIPTION_MAX));
        f.metrics();
        f.hero();
        f.optional_string("duration");
        f.seo();
        f.optional_bool("draft");
        f.date("publishedAt", false);
        f.finish()
    }
}
