//! Render-cycle state: the error taxonomy, the fallback state machine and
//! its HTTP status mapping.

mod error;
mod http_mapping;
mod state;

pub use error::RenderError;
pub use http_mapping::phase_to_status_code;
pub use state::{PageState, Phase, TransitionError};
