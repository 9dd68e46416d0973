//! inkpage Core Library
//!
//! Platform-agnostic data structures and interaction logic for the inkpage
//! freehand drawing engine.

pub mod camera;
pub mod config;
pub mod document;
pub mod engine;
pub mod eraser;
pub mod frame;
pub mod history;
pub mod input;
pub mod lasso;
pub mod paper;
pub mod shortcuts;
pub mod storage;
pub mod stroke;
pub mod tools;

pub use camera::ViewTransform;
pub use config::{ConfigError, EngineConfig};
pub use document::Document;
pub use engine::{Engine, Gesture};
pub use eraser::EraserMode;
pub use frame::FrameScheduler;
pub use history::History;
pub use input::{Modifiers, PointerButton, PointerEvent, PointerSample, PointerType};
pub use lasso::Selection;
pub use paper::{PaperColor, PaperSettings, PaperType};
pub use shortcuts::{Command, KeyInput, ShortcutRegistry};
pub use storage::{MemoryStorage, PersistedAttrs, Storage, StorageError};
#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
pub use stroke::{Stroke, StrokeId, StrokePoint, StrokeTool};
pub use tools::{Tool, ToolManager};
