pub mod section;

pub use section::{Badge, BadgeVariant, Note, NoteVariant, PaymentDetail, Section, SectionGroup};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const BUILTIN_PAGE: &str = include_str!("../../assets/payments.toml");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub groups: Vec<SectionGroup>,
}

/// Position of a copyable detail within a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldRef {
    pub group: usize,
    pub section: usize,
    pub detail: usize,
}

impl Page {
    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN_PAGE).context("Built-in payment page is malformed")
    }

    pub fn parse(content: &str) -> Result<Self> {
        let page: Page = toml::from_str(content)?;
        Ok(page)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read payment data: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse payment data: {}", path.display()))
    }

    /// Load from `path` if given, otherwise use the built-in page.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    /// Every copyable detail in display order.
    pub fn copyable_fields(&self) -> Vec<FieldRef> {
        let mut fields = Vec::new();
        for (g, group) in self.groups.iter().enumerate() {
            for (s, section) in group.sections.iter().enumerate() {
                for (d, _) in section.copyable_details() {
                    fields.push(FieldRef {
                        group: g,
                        section: s,
                        detail: d,
                    });
                }
            }
        }
        fields
    }

    pub fn section(&self, field: FieldRef) -> Option<&Section> {
        self.groups.get(field.group)?.sections.get(field.section)
    }

    pub fn detail(&self, field: FieldRef) -> Option<&PaymentDetail> {
        self.section(field)?.details.get(field.detail)
    }

    /// Find the single copyable detail whose label or value matches `query`.
    ///
    /// Values match exactly; labels match case-insensitively and may be
    /// qualified with the section title as `"Section / Label"`.
    pub fn find_copyable(&self, query: &str) -> Result<&PaymentDetail> {
        let query = query.trim();
        let wanted = query.to_lowercase();

        let matches: Vec<(&Section, &PaymentDetail)> = self
            .copyable_fields()
            .into_iter()
            .filter_map(|field| Some((self.section(field)?, self.detail(field)?)))
            .filter(|(section, detail)| {
                detail.value == query
                    || detail.label.to_lowercase() == wanted
                    || format!("{} / {}", section.title, detail.label).to_lowercase() == wanted
            })
            .collect();

        // Equal values under different labels are one and the same copy.
        let first = match matches.first() {
            Some((_, detail)) => *detail,
            None => bail!("No copyable field matches '{query}'"),
        };
        if matches.iter().all(|(_, detail)| detail.value == first.value) {
            return Ok(first);
        }

        let candidates: Vec<String> = matches
            .iter()
            .map(|(section, detail)| format!("{} / {}", section.title, detail.label))
            .collect();
        bail!(
            "'{query}' is ambiguous, use one of: {}",
            candidates.join(", ")
        )
    }
}
