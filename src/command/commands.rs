use egui::{Pos2, Rect};
use serde::{Deserialize, Serialize};

use super::{CommandError, CommandResult};
use crate::document::Deck;
use crate::element::{Element, ElementProperty, ElementType};
use crate::id_generator::{ElementId, PageId};
use crate::page::Page;

/// An invertible edit of a page.
///
/// Commands address their page and element by id and carry every value they need, so undo never
/// reads ambient editor state. `execute` must be safe to call when the page is already in the
/// post-state: drag gestures apply their change live and then push the matching command, which
/// re-executes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Append an element to the page
    AddElement {
        page: PageId,
        element: ElementType,
    },

    /// Remove an element, remembering where it sat in the z-order
    RemoveElement {
        page: PageId,
        element: ElementType,
        index: usize,
    },

    /// Move an element to the top of the z-order
    BringToFront {
        page: PageId,
        element: ElementId,
        original_index: usize,
    },

    /// Move an element to the bottom of the z-order
    SendToBack {
        page: PageId,
        element: ElementId,
        original_index: usize,
    },

    /// Replace the unrotated bounds of a box element
    ChangeBounds {
        page: PageId,
        element: ElementId,
        before: Rect,
        after: Rect,
    },

    /// Replace both endpoints of a line
    ChangeLineEndpoints {
        page: PageId,
        element: ElementId,
        before: [Pos2; 2],
        after: [Pos2; 2],
    },

    /// Change one property of an element
    ChangeProperty {
        page: PageId,
        element: ElementId,
        before: ElementProperty,
        after: ElementProperty,
    },

    /// Swap the whole element list of a page
    ApplyLayout {
        page: PageId,
        old_elements: Vec<ElementType>,
        new_elements: Vec<ElementType>,
    },
}

impl Command {
    pub fn add_element(page: PageId, element: ElementType) -> Self {
        Command::AddElement { page, element }
    }

    /// Removal of `id`, capturing the element and its current index.
    pub fn remove_element(page: &Page, id: ElementId) -> Result<Self, CommandError> {
        let index = page.index_of(id).ok_or(CommandError::ElementNotFound(id))?;
        Ok(Command::RemoveElement {
            page: page.id(),
            element: page.elements()[index].clone(),
            index,
        })
    }

    pub fn bring_to_front(page: &Page, id: ElementId) -> Result<Self, CommandError> {
        let original_index = page.index_of(id).ok_or(CommandError::ElementNotFound(id))?;
        Ok(Command::BringToFront {
            page: page.id(),
            element: id,
            original_index,
        })
    }

    pub fn send_to_back(page: &Page, id: ElementId) -> Result<Self, CommandError> {
        let original_index = page.index_of(id).ok_or(CommandError::ElementNotFound(id))?;
        Ok(Command::SendToBack {
            page: page.id(),
            element: id,
            original_index,
        })
    }

    /// Property change whose "before" value is read from the element as it is now.
    pub fn change_property(
        page: &Page,
        id: ElementId,
        after: ElementProperty,
    ) -> Result<Self, CommandError> {
        let element = page.get_element(id).ok_or(CommandError::ElementNotFound(id))?;
        let before = element
            .property(after.kind())
            .ok_or(CommandError::PropertyMismatch {
                property: after.kind(),
                element: element.element_type(),
            })?;
        Ok(Command::ChangeProperty {
            page: page.id(),
            element: id,
            before,
            after,
        })
    }

    /// Layout swap capturing the page's current elements for undo.
    pub fn apply_layout(page: &Page, new_elements: Vec<ElementType>) -> Self {
        Command::ApplyLayout {
            page: page.id(),
            old_elements: page.elements().to_vec(),
            new_elements,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::AddElement { .. } => "add element",
            Command::RemoveElement { .. } => "remove element",
            Command::BringToFront { .. } => "bring to front",
            Command::SendToBack { .. } => "send to back",
            Command::ChangeBounds { .. } => "change bounds",
            Command::ChangeLineEndpoints { .. } => "change line endpoints",
            Command::ChangeProperty { .. } => "change property",
            Command::ApplyLayout { .. } => "apply layout",
        }
    }

    pub fn page_id(&self) -> PageId {
        match self {
            Command::AddElement { page, .. }
            | Command::RemoveElement { page, .. }
            | Command::BringToFront { page, .. }
            | Command::SendToBack { page, .. }
            | Command::ChangeBounds { page, .. }
            | Command::ChangeLineEndpoints { page, .. }
            | Command::ChangeProperty { page, .. }
            | Command::ApplyLayout { page, .. } => *page,
        }
    }

    /// Apply the command's end state.
    pub fn execute(&self, deck: &mut Deck) -> CommandResult {
        let page = page_mut(deck, self.page_id())?;
        match self {
            Command::AddElement { element, .. } => {
                if !page.contains_element(element.id()) {
                    page.add_element(element.clone());
                }
            }

            Command::RemoveElement { element, .. } => {
                page.remove_element(element.id());
            }

            Command::BringToFront { element, .. } => {
                let last = page.len().saturating_sub(1);
                page.move_element_to(*element, last)
                    .ok_or(CommandError::ElementNotFound(*element))?;
            }

            Command::SendToBack { element, .. } => {
                page.move_element_to(*element, 0)
                    .ok_or(CommandError::ElementNotFound(*element))?;
            }

            Command::ChangeBounds { element, after, .. } => {
                element_mut(page, *element)?.set_bounds(*after);
            }

            Command::ChangeLineEndpoints { element, after, .. } => {
                line_mut(page, *element)?.set_endpoints(after[0], after[1]);
            }

            Command::ChangeProperty { element, after, .. } => {
                element_mut(page, *element)?.apply_property(after)?;
            }

            Command::ApplyLayout { new_elements, .. } => {
                page.replace_elements(new_elements.clone());
            }
        }
        Ok(())
    }

    /// Restore the state the command was built against.
    pub fn undo(&self, deck: &mut Deck) -> CommandResult {
        let page = page_mut(deck, self.page_id())?;
        match self {
            Command::AddElement { element, .. } => {
                page.remove_element(element.id());
            }

            Command::RemoveElement { element, index, .. } => {
                if !page.contains_element(element.id()) {
                    page.insert_element(*index, element.clone());
                }
            }

            Command::BringToFront { element, original_index, .. }
            | Command::SendToBack { element, original_index, .. } => {
                page.move_element_to(*element, *original_index)
                    .ok_or(CommandError::ElementNotFound(*element))?;
            }

            Command::ChangeBounds { element, before, .. } => {
                element_mut(page, *element)?.set_bounds(*before);
            }

            Command::ChangeLineEndpoints { element, before, .. } => {
                line_mut(page, *element)?.set_endpoints(before[0], before[1]);
            }

            Command::ChangeProperty { element, before, .. } => {
                element_mut(page, *element)?.apply_property(before)?;
            }

            Command::ApplyLayout { old_elements, .. } => {
                page.replace_elements(old_elements.clone());
            }
        }
        Ok(())
    }
}

fn page_mut(deck: &mut Deck, id: PageId) -> Result<&mut Page, CommandError> {
    deck.page_mut(id).ok_or(CommandError::PageNotFound(id))
}

fn element_mut(page: &mut Page, id: ElementId) -> Result<&mut ElementType, CommandError> {
    page.get_element_mut(id).ok_or(CommandError::ElementNotFound(id))
}

fn line_mut(page: &mut Page, id: ElementId) -> Result<&mut crate::element::Line, CommandError> {
    element_mut(page, id)?
        .as_line_mut()
        .ok_or(CommandError::NotALine(id))
}
