use board_core::models::Board;

use crate::models::UpdateBoardRequest;

/// Overwrites every simple field the request carries a value for.
pub fn apply_scalars(board: &mut Board, req: &UpdateBoardRequest) {
    if let Some(title) = req.title.as_value() {
        board.title = title.clone();
    }
    if let Some(description) = req.description.as_value() {
        board.description = description.clone();
    }
    if let Some(start) = req.start_date.as_value() {
        board.start_date = Some(*start);
    }
    if let Some(due) = req.due_date.as_value() {
        board.due_date = Some(*due);
    }
    if let Some(assignees) = req.assignee_ids.as_value() {
        board.assignee_ids = assignees.clone();
    }
}
