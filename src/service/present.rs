use board_core::models::BoardWithAssociations;

use super::BoardService;
use crate::models::BoardResponse;

impl BoardService {
    pub(super) async fn present(&self, loaded: BoardWithAssociations) -> BoardResponse {
        let custom_fields = self.readable_custom_fields(&loaded.board).await;
        BoardResponse::new(loaded, custom_fields)
    }
}
