//! # Story Session
//!
//! The pages of a printed story together with the ids needed to continue
//! a chained text/image generation conversation. The session lives in
//! memory only; whoever drives the story owns it and calls [`StorySession::clear`]
//! to start over.

use image::RgbaImage;

/// One page of a story.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub page_number: u32,
    pub text: Option<String>,
    pub image: Option<RgbaImage>,
}

impl Page {
    pub fn new(page_number: u32) -> Self {
        Self {
            page_number,
            text: None,
            image: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StorySession {
    pages: Vec<Page>,
    previous_text_response_id: Option<String>,
    previous_image_response_id: Option<String>,
    seed_prompt: Option<String>,
}

impl StorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all pages, response ids and the seed prompt.
    pub fn clear(&mut self) {
        self.pages.clear();
        self.previous_text_response_id = None;
        self.previous_image_response_id = None;
        self.seed_prompt = None;
    }

    /// Copy of the pages in insertion order.
    pub fn snapshot_pages(&self) -> Vec<Page> {
        self.pages.clone()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Append an empty page and return it for filling in.
    pub fn add_new_page(&mut self, page_number: u32) -> &mut Page {
        self.pages.push(Page::new(page_number));
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    pub fn next_page_number(&self) -> u32 {
        self.pages.len() as u32 + 1
    }

    /// True once a page exists or a non-blank seed prompt has been set.
    pub fn has_started(&self) -> bool {
        !self.pages.is_empty()
            || self
                .seed_prompt
                .as_deref()
                .is_some_and(|prompt| !prompt.trim().is_empty())
    }

    pub fn previous_text_response_id(&self) -> Option<&str> {
        self.previous_text_response_id.as_deref()
    }

    pub fn set_previous_text_response_id(&mut self, id: Option<String>) {
        self.previous_text_response_id = id;
    }

    pub fn previous_image_response_id(&self) -> Option<&str> {
        self.previous_image_response_id.as_deref()
    }

    pub fn set_previous_image_response_id(&mut self, id: Option<String>) {
        self.previous_image_response_id = id;
    }

    pub fn seed_prompt(&self) -> Option<&str> {
        self.seed_prompt.as_deref()
    }

    pub fn set_seed_prompt(&mut self, prompt: Option<String>) {
        self.seed_prompt = prompt;
    }
}

// ============================================================================
// TESTS
// ============================================================================
