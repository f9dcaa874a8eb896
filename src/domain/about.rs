use serde::{Deserialize, Serialize};

use crate::domain::{FieldKind, FieldSpec, SingletonRecord};

/// Free-text "About Us" content, a single merge-written document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutContent {
    #[serde(default)]
    pub chapter_history: String,
    #[serde(default)]
    pub objectives: String,
    #[serde(default)]
    pub vision: String,
    #[serde(default)]
    pub mission: String,
    #[serde(default)]
    pub department_overview: String,
    #[serde(default)]
    pub updated_at: Option<crate::store::DateValue>,
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::optional("chapterHistory", FieldKind::Text),
    FieldSpec::optional("objectives", FieldKind::Text),
    FieldSpec::optional("vision", FieldKind::Text),
    FieldSpec::optional("mission", FieldKind::Text),
    FieldSpec::optional("departmentOverview", FieldKind::Text),
];

impl SingletonRecord for AboutContent {
    const COLLECTION: &'static str = "content";
    const DOC_ID: &'static str = "about";
    const LABEL: &'static str = "\"About Us\" content";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }
}
