use egui::Vec2;
use log::info;
use serde::{Deserialize, Serialize};

use crate::id_generator::PageId;
use crate::page::Page;

/// Default design size of a slide in logical units.
pub const DEFAULT_PAGE_SIZE: Vec2 = Vec2::new(1200.0, 800.0);

/// A presentation: ordered pages, the page being edited and the page design size.
///
/// A deck always holds at least one page, so there is always a current page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pages: Vec<Page>,
    current_page: usize,
    page_size: Vec2,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Deck {
    pub fn new(page_size: Vec2) -> Self {
        Self {
            pages: vec![Page::new()],
            current_page: 0,
            page_size,
        }
    }

    /// Deck over existing pages, starting on the first. An empty list gets one blank page.
    pub fn from_pages(mut pages: Vec<Page>, page_size: Vec2) -> Self {
        if pages.is_empty() {
            pages.push(Page::new());
        }
        Self {
            pages,
            current_page: 0,
            page_size,
        }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page_size(&self) -> Vec2 {
        self.page_size
    }

    /// Append a page and make it current.
    pub fn add_page(&mut self, page: Page) -> PageId {
        let id = page.id();
        self.pages.push(page);
        self.current_page = self.pages.len() - 1;
        info!("Added page {} ({} pages)", id, self.pages.len());
        id
    }

    pub fn current_page_index(&self) -> usize {
        self.current_page
    }

    /// Jump to `index`; out of range indices are ignored.
    pub fn set_current_page_index(&mut self, index: usize) -> bool {
        if index < self.pages.len() {
            self.current_page = index;
            true
        } else {
            false
        }
    }

    pub fn next_page(&mut self) -> bool {
        self.set_current_page_index(self.current_page + 1)
    }

    pub fn previous_page(&mut self) -> bool {
        match self.current_page.checked_sub(1) {
            Some(index) => self.set_current_page_index(index),
            None => false,
        }
    }

    pub fn current_page(&self) -> &Page {
        &self.pages[self.current_page]
    }

    pub fn current_page_mut(&mut self) -> &mut Page {
        &mut self.pages[self.current_page]
    }

    pub fn page(&self, id: PageId) -> Option<&Page> {
        self.pages.iter().find(|p| p.id() == id)
    }

    pub fn page_mut(&mut self, id: PageId) -> Option<&mut Page> {
        self.pages.iter_mut().find(|p| p.id() == id)
    }
}
