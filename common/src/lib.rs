//! Preventive Maintenance Common Library
//!
//! Web(WASM)フロントエンドと共有される型・検証・フィルタロジック

pub mod error;
pub mod filters;
pub mod session;
pub mod types;
pub mod validation;

pub use error::{Error, Result};
pub use filters::{FilterForm, FilterSnapshot};
pub use session::{ChecklistSession, RowEntry};
pub use types::{
    ChecklistItem, ChecklistModalResponse, ChecklistResult, ItemStatus, ItemType,
    SaveChecklistRequest, SaveChecklistResponse,
};
pub use validation::{validate_value, HighlightUpdate, RowHighlight, StatusUpdate, ValidationOutcome};
