//! User intents accepted by the navigation controller.

/// A named user action that may trigger a page transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Search titles. Valid on the start and results pages.
    Search { query: String, page: u32 },
    /// Load another page of the current query. Valid on the results page.
    ChangePage(u32),
    /// Load the page after the current one, or after the page still loading.
    NextPage,
    /// Load the page before the current one, or before the page still loading.
    PrevPage,
    /// Open the detail view for one IMDb id. Valid on the results page.
    SelectItem(String),
    /// Return from details to results.
    Back,
    /// Return to the start page from anywhere.
    GoHome,
}

impl Intent {
    /// Search starting at the first page.
    pub fn search(query: impl Into<String>) -> Self {
        Intent::Search {
            query: query.into(),
            page: 1,
        }
    }

    pub fn select(imdb_id: impl Into<String>) -> Self {
        Intent::SelectItem(imdb_id.into())
    }

    /// Short name used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Intent::Search { .. } => "Search",
            Intent::ChangePage(_) => "ChangePage",
            Intent::NextPage => "NextPage",
            Intent::PrevPage => "PrevPage",
            Intent::SelectItem(_) => "SelectItem",
            Intent::Back => "Back",
            Intent::GoHome => "GoHome",
        }
    }
}
