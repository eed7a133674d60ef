//! Board updates with attachment and participant reconciliation.
//!
//! [`service::BoardService::update_board`] applies an
//! [`models::UpdateBoardRequest`] to a stored board. Persistence, attachment
//! storage and custom field definitions are reached through the traits in
//! [`store`] and [`storage`].

pub mod cleanup;
pub mod config;
pub mod error;
pub mod fields;
pub mod models;
pub mod service;
pub mod storage;
pub mod store;

pub use cleanup::AttachmentCleaner;
pub use config::Config;
pub use error::{AppError, ErrorCode};
pub use service::BoardService;
