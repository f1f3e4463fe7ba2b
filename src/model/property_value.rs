use serde::Deserialize;
use serde_json::Value;

/// A fragment of Notion rich text. Only the rendered plain text is kept.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RichTextItem {
    #[serde(default)]
    pub plain_text: String,
}

/// Select, multi-select and status options share this shape.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SelectOption {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DateValue {
    #[serde(default)]
    pub start: Option<String>,
}

/// A page property value, decoded as a closed variant keyed by its `type` tag.
///
/// Anything this crate does not read decodes to [`PropertyValue::Unsupported`],
/// and so does a known tag whose payload is malformed. The projections below
/// are total: asking a value for a shape it does not have yields the zero
/// value of that shape.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title {
        #[serde(default)]
        title: Vec<RichTextItem>,
    },
    RichText {
        #[serde(default)]
        rich_text: Vec<RichTextItem>,
    },
    Select {
        select: Option<SelectOption>,
    },
    Status {
        status: Option<SelectOption>,
    },
    MultiSelect {
        #[serde(default)]
        multi_select: Vec<SelectOption>,
    },
    Date {
        date: Option<DateValue>,
    },
    LastEditedTime {
        last_edited_time: Option<String>,
    },
    #[serde(other)]
    Unsupported,
}

impl PropertyValue {
    /// Decodes a raw property object without ever failing.
    pub fn decode(raw: &Value) -> Self {
        PropertyValue::deserialize(raw).unwrap_or_else(|e| {
            log::debug!("Undecodable property value, treating as unsupported: {}", e);
            PropertyValue::Unsupported
        })
    }

    /// Joined plain text of a `title` property.
    pub fn title_text(&self) -> String {
        match self {
            Self::Title { title } => join_plain_text(title),
            _ => String::new(),
        }
    }

    /// Joined plain text of a `rich_text` property.
    pub fn rich_text(&self) -> String {
        match self {
            Self::RichText { rich_text } => join_plain_text(rich_text),
            _ => String::new(),
        }
    }

    /// Option name of a `status` property.
    pub fn status_name(&self) -> String {
        match self {
            Self::Status { status } => option_name(status),
            _ => String::new(),
        }
    }

    /// Option name of either a `select` or a `status` property.
    pub fn choice_name(&self) -> String {
        match self {
            Self::Select { select } => option_name(select),
            Self::Status { status } => option_name(status),
            _ => String::new(),
        }
    }

    /// Option names of a `multi_select` property, in source order.
    pub fn multi_select_names(&self) -> Vec<String> {
        match self {
            Self::MultiSelect { multi_select } => multi_select
                .iter()
                .filter_map(|option| option.name.clone())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Start of a `date` property.
    pub fn date_start(&self) -> Option<String> {
        match self {
            Self::Date { date } => date.as_ref().and_then(|d| d.start.clone()),
            _ => None,
        }
    }

    /// Start of a `date` property, or the value of a `last_edited_time` property.
    pub fn date_or_edit_time(&self) -> Option<String> {
        match self {
            Self::LastEditedTime { last_edited_time } => last_edited_time.clone(),
            other => other.date_start(),
        }
    }
}

fn join_plain_text(items: &[RichTextItem]) -> String {
    items.iter().map(|t| t.plain_text.as_str()).collect()
}

fn option_name(option: &Option<SelectOption>) -> String {
    option
        .as_ref()
        .and_then(|o| o.name.clone())
        .unwrap_or_default()
}
