use bookshelf_core::render::{PageState, Phase, RenderError};
use bookshelf_core::route::{PageProps, PageResult};
use serde::Serialize;

/// What a request for a page resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Resolution {
    /// Render the page in this state.
    Page(PageState<PageProps>),
    /// Send the client elsewhere.
    Redirect(String),
}

impl Resolution {
    pub fn idle() -> Self {
        Resolution::Page(PageState::Idle)
    }

    pub fn loading() -> Self {
        Resolution::Page(PageState::Loading)
    }

    pub fn not_found() -> Self {
        Resolution::Page(PageState::NotFound)
    }

    /// Settles a load outcome into a terminal page state or a redirect.
    pub fn from_outcome(outcome: Result<PageResult<PageProps>, RenderError>) -> Self {
        match outcome {
            Ok(PageResult::Props(props)) => Resolution::Page(PageState::Ready(props)),
            Ok(PageResult::NotFound) => Resolution::not_found(),
            Ok(PageResult::Redirect(location)) => Resolution::Redirect(location),
            Err(err) => Resolution::Page(PageState::settled(Err(err))),
        }
    }

    /// Phase of the page, `None` for redirects.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            Resolution::Page(state) => Some(state.phase()),
            Resolution::Redirect(_) => None,
        }
    }
}
