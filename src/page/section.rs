use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    Active,
    Network,
    Erc20,
    Multi,
    Litecoin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<BadgeVariant>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteVariant {
    #[default]
    Info,
    Warning,
}

impl NoteVariant {
    pub fn heading(&self) -> &'static str {
        match self {
            NoteVariant::Info => "Payment Information",
            NoteVariant::Warning => "Important",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            NoteVariant::Info => "ℹ️",
            NoteVariant::Warning => "⚠️",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub text: String,
    #[serde(default)]
    pub variant: NoteVariant,
}

/// One labelled value inside a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetail {
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub copyable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
    #[serde(default)]
    pub details: Vec<PaymentDetail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<Note>,
    #[serde(default)]
    pub coming_soon: bool,
}

impl Section {
    /// Details a user can interact with. Placeholder sections expose none.
    pub fn copyable_details(&self) -> impl Iterator<Item = (usize, &PaymentDetail)> {
        self.details
            .iter()
            .enumerate()
            .filter(move |(_, detail)| detail.copyable && !self.coming_soon)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionGroup {
    pub title: String,
    pub icon: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}
