use egui::Pos2;
use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementType};
use crate::id_generator::{ElementId, PageId};

/// One slide: an ordered list of elements. Later elements draw on top and are hit first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    id: PageId,
    elements: Vec<ElementType>,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    pub fn new() -> Self {
        Self {
            id: PageId::new(),
            elements: Vec::new(),
        }
    }

    pub fn with_elements(elements: Vec<ElementType>) -> Self {
        Self {
            id: PageId::new(),
            elements,
        }
    }

    pub fn id(&self) -> PageId {
        self.id
    }

    pub fn elements(&self) -> &[ElementType] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn add_element(&mut self, element: ElementType) {
        self.elements.push(element);
    }

    /// Insert at `index`; an index past the end appends.
    pub fn insert_element(&mut self, index: usize, element: ElementType) {
        if index <= self.elements.len() {
            self.elements.insert(index, element);
        } else {
            self.elements.push(element);
        }
    }

    /// Remove an element, returning it with the index it occupied.
    pub fn remove_element(&mut self, id: ElementId) -> Option<(usize, ElementType)> {
        let index = self.index_of(id)?;
        Some((index, self.elements.remove(index)))
    }

    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }

    pub fn contains_element(&self, id: ElementId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn get_element(&self, id: ElementId) -> Option<&ElementType> {
        self.elements.iter().find(|e| e.id() == id)
    }

    pub fn get_element_mut(&mut self, id: ElementId) -> Option<&mut ElementType> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }

    /// Top-most element whose rotation-aware containment test includes `pos`.
    pub fn element_at_position(&self, pos: Pos2) -> Option<&ElementType> {
        self.elements.iter().rev().find(|e| e.contains(pos))
    }

    /// Move an element to `index` (clamped to the last slot). Returns its previous index.
    pub fn move_element_to(&mut self, id: ElementId, index: usize) -> Option<usize> {
        let old_index = self.index_of(id)?;
        let element = self.elements.remove(old_index);
        let index = index.min(self.elements.len());
        self.elements.insert(index, element);
        Some(old_index)
    }

    /// Swap in a whole new element list, returning the old one.
    pub fn replace_elements(&mut self, elements: Vec<ElementType>) -> Vec<ElementType> {
        std::mem::replace(&mut self.elements, elements)
    }
}
