//! Best-path selection among accepted search results.

use cauldron_types::Ingredients;

use crate::error::EngineError;
use crate::search::CandidatePath;

/// Pick the path to follow toward `target`.
///
/// Ranks by the weighted cost of what the final inventory still lacks, then
/// by fewest actions. Remaining ties go to the path found first.
///
/// # Errors
///
/// Returns [`EngineError::Ingredient`] if `target` has a negative component.
pub fn select_best_path<'a>(
    paths: &'a [CandidatePath],
    target: &Ingredients,
) -> Result<Option<&'a CandidatePath>, EngineError> {
    let mut best: Option<((i32, usize), &CandidatePath)> = None;
    for path in paths {
        let key = (path.inventory.deficit_cost(target)?, path.len());
        if best.is_none_or(|(best_key, _)| key < best_key) {
            best = Some((key, path));
        }
    }
    Ok(best.map(|(_, path)| path))
}
