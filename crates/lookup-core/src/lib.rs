pub mod component;
pub mod config;
pub mod error;
pub mod events;
pub mod record;
pub mod selection;
pub mod session;
pub mod source;

pub use component::{DisplayMode, Lookup};
pub use config::{LookupConfig, DEFAULT_DISPLAY_FIELD};
pub use error::{LookupError, Result};
pub use events::{EventEmitter, SelectionChange, SELECTION_EVENT};
pub use record::{FieldValue, RawRecord, ResultEntry, SelectedRecord};
pub use selection::{SelectionMode, SelectionStore};
pub use session::{SearchRequest, SearchSession, MIN_TERM_LEN};
pub use source::{MemorySource, RecordSearch};
