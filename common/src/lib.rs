//! Product Passport Common Library
//!
//! CLIとWeb(WASM)で共有される型とロジック

pub mod types;
pub mod error;
pub mod form;
pub mod storage;
pub mod store;
pub mod format;
pub mod escape;
pub mod render;
pub mod wall;
pub mod demo;

pub use types::{Category, CategoryMeta, PassportDraft, PassportRecord};
pub use error::{Error, Result};
pub use form::{read_form_data, FormField, FormInput, ValidationError};
pub use storage::{MemoryStorage, StorageSurface};
pub use store::{Clock, DeleteOutcome, PassportStore, PersistStatus, SaveOutcome, SystemClock, STORAGE_KEY};
pub use format::{
    format_co2_detail, format_co2_metric, format_co2_level, format_material, format_summary,
    format_timestamp, meter_percent, qr_payload, Co2Band,
};
pub use escape::escape_html;
pub use render::{render_preview, render_wall, render_wall_entry, EMPTY_WALL_MESSAGE};
pub use wall::{ToggleOutcome, WallEntryState, WallState};
pub use demo::{random_form, ORIGINS};
