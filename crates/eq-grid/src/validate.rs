use crate::error::{GridError, GridResult};

pub(crate) fn validate_depths(depths: &[f64]) -> GridResult<()> {
    if depths.is_empty() {
        return Err(GridError::Empty);
    }
    for (cell, &depth) in depths.iter().enumerate() {
        if !depth.is_finite() {
            return Err(GridError::NonFiniteDepth { cell, depth });
        }
    }
    Ok(())
}

pub(crate) fn validate_assignment(assignment: &[usize], num_cells: usize) -> GridResult<()> {
    if assignment.len() != num_cells {
        return Err(GridError::AssignmentLength {
            expected: num_cells,
            actual: assignment.len(),
        });
    }
    Ok(())
}
