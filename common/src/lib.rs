//! Variant Grid Common Library
//!
//! CLIとWeb(WASM)で共有される状態機械と型

pub mod types;
pub mod catalog;
pub mod error;
pub mod session;
pub mod action;

pub use types::{CellPos, Grid, GridSeed, ImageRef, Row};
pub use catalog::{Catalog, CatalogEntry};
pub use error::{Error, Result};
pub use session::{Completion, Picker, Session, StructuralOp, TagDraft, TagTarget, Ticket, UiStatus, BUSY_WINDOW_MS};
pub use action::{Action, Outcome};
