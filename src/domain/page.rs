/// Upper bound the listing API accepts for a single page.
pub const MAX_PAGE_SIZE: u32 = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub playlist_id: String,
    pub page_token: Option<String>,
    pub max_results: u32,
}

impl PageRequest {
    pub fn first(playlist_id: &str) -> Self {
        Self {
            playlist_id: playlist_id.to_string(),
            page_token: None,
            max_results: MAX_PAGE_SIZE,
        }
    }

    pub fn next(&self, page_token: String) -> Self {
        Self {
            page_token: Some(page_token),
            ..self.clone()
        }
    }
}

/// One listing entry as the API returned it, before any interpretation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    pub video_id: Option<String>,
    pub title: String,
    pub description: String,
    pub published_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub entries: Vec<RawEntry>,
    pub next_page_token: Option<String>,
    pub total_results: Option<u64>,
}

impl Page {
    pub fn is_last(&self) -> bool {
        self.next_page_token
            .as_deref()
            .map_or(true, |token| token.is_empty())
    }
}
