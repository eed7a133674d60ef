//! Core library for board updates.
//!
//! This crate provides the domain models and database operations for boards
//! and the collections attached to them (attachments, participants, custom
//! field definitions), independent of any transport layer.
//!
//! # Usage
//!
//! ```no_run
//! use board_core::db::Database;
//! use board_core::models::*;
//!
//! let db = Database::open_default()?;
//! db.migrate()?;
//!
//! let board = db.with_connection(|conn| Board::find_by_id(conn, uuid::Uuid::nil()))?;
//! # Ok::<(), board_core::StoreError>(())
//! ```

pub mod db;
pub mod error;
pub mod models;

// Re-export commonly used types at crate root
pub use db::Database;
pub use error::{StoreError, StoreResult};
