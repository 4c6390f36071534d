use serde::{Deserialize, Serialize};

use crate::element::{ElementType, factory};

pub const TITLE_PLACEHOLDER: &str = "Title";
pub const CONTENT_PLACEHOLDER: &str = "Content";

/// Canned page arrangements of placeholder text boxes on a 1200x800 slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLayout {
    TitleOnly,
    TitleAndContent,
    TwoColumns,
}

impl PageLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TitleOnly => "title_only",
            Self::TitleAndContent => "title_and_content",
            Self::TwoColumns => "two_columns",
        }
    }

    /// Fresh placeholder elements for this layout, bottom-most first.
    pub fn elements(&self) -> Vec<ElementType> {
        let title = factory::create_text(50.0, 50.0, 1100.0, 100.0, TITLE_PLACEHOLDER);
        match self {
            Self::TitleOnly => vec![title],
            Self::TitleAndContent => vec![
                title,
                factory::create_text(50.0, 180.0, 1100.0, 550.0, CONTENT_PLACEHOLDER),
            ],
            Self::TwoColumns => vec![
                title,
                factory::create_text(50.0, 180.0, 540.0, 550.0, CONTENT_PLACEHOLDER),
                factory::create_text(610.0, 180.0, 540.0, 550.0, CONTENT_PLACEHOLDER),
            ],
        }
    }
}
