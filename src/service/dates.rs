use board_core::models::Board;
use chrono::{DateTime, Utc};

use crate::error::AppError;
use crate::models::UpdateBoardRequest;

/// Start and due dates as they would be after applying `req` to `board`.
pub fn effective_dates(
    board: &Board,
    req: &UpdateBoardRequest,
) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
    let start = req.start_date.as_value().copied().or(board.start_date);
    let due = req.due_date.as_value().copied().or(board.due_date);
    (start, due)
}

/// Rejects a request whose effective start date is after its effective due date.
pub fn validate_date_range(board: &Board, req: &UpdateBoardRequest) -> Result<(), AppError> {
    if let (Some(start), Some(due)) = effective_dates(board, req) {
        if start > due {
            return Err(AppError::validation("Start date cannot be after due date"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()
    }

    fn board(start: Option<u32>, due: Option<u32>) -> Board {
        let mut board = Board::new(Uuid::new_v4(), "Dates");
        board.start_date = start.map(day);
        board.due_date = due.map(day);
        board
    }

    #[test]
    fn due_only_update_checks_against_existing_start() {
        let board = board(Some(10), Some(20));
        let req = UpdateBoardRequest {
            due_date: day(5).into(),
            ..Default::default()
        };

        assert_eq!(effective_dates(&board, &req), (Some(day(10)), Some(day(5))));
        let err = validate_date_range(&board, &req).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationError);
    }

    #[test]
    fn start_only_update_checks_against_existing_due() {
        let board = board(None, Some(20));
        let ok = UpdateBoardRequest {
            start_date: day(20).into(),
            ..Default::default()
        };
        let bad = UpdateBoardRequest {
            start_date: day(21).into(),
            ..Default::default()
        };

        assert!(validate_date_range(&board, &ok).is_ok());
        assert!(validate_date_range(&board, &bad).is_err());
    }

    #[test]
    fn one_sided_range_is_always_valid() {
        let board = board(None, None);
        let req = UpdateBoardRequest {
            start_date: day(31).into(),
            ..Default::default()
        };
        assert!(validate_date_range(&board, &req).is_ok());
    }

    #[test]
    fn moving_both_dates_ignores_stored_range() {
        let board = board(Some(10), Some(20));
        let req = UpdateBoardRequest {
            start_date: day(1).into(),
            due_date: day(2).into(),
            ..Default::default()
        };
        assert!(validate_date_range(&board, &req).is_ok());
    }
}
