//! Pure mapping from render phases to HTTP status codes.

use super::Phase;

/// Maps a [`Phase`] to the HTTP status code of the response that carries it.
///
/// - `Idle`, `Loading`, `Ready` -> 200 (placeholders are regular pages)
/// - `NotFound` -> 404
/// - `Error` -> 500
///
/// # Examples
///
/// ```
/// use bookshelf_core::render::{phase_to_status_code, Phase};
///
/// assert_eq!(phase_to_status_code(Phase::NotFound), 404);
/// ```
pub fn phase_to_status_code(phase: Phase) -> u16 {
    match phase {
        Phase::Idle | Phase::Loading | Phase::Ready => 200,
        Phase::NotFound => 404,
        Phase::Error => 500,
    }
}
