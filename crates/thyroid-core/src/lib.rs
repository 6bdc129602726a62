//! # Thyroid Ritual Core Library
//!
//! Core logic for a hypothyroidism wellness tracker: the morning
//! "take the pill, wait, then eat" ritual, a symptom diary, a weight/dose
//! log and a summary for medical appointments. Front ends (the CLI, the
//! advice proxy) are thin layers over this crate.
//!
//! ## Architecture
//!
//! - **Ritual Timer**: A wall-clock-anchored state machine
//!   (`WAITING -> TAKEN -> READY_TO_EAT`) that requires the caller to
//!   periodically invoke `tick()`; survives restarts by persisting only the
//!   start timestamp and configured wait
//! - **Storage**: Synchronous key-value store (SQLite or in-memory) holding
//!   JSON text, plus TOML configuration
//! - **History**: Profile singleton, prepend-only symptom log, append-only
//!   weight log
//! - **Advice**: HTTP client for breakfast-wait suggestions and tips that
//!   always degrades to fixed fallbacks
//!
//! ## Key Components
//!
//! - [`App`]: Controller owning all mutable state
//! - [`RitualTimer`]: Core ritual state machine
//! - [`Database`]: Persistent key-value store
//! - [`Config`]: Application configuration management
//! - [`Advisor`]: Recommendation service seam

pub mod advice;
pub mod app;
pub mod clock;
pub mod error;
pub mod events;
pub mod history;
pub mod report;
pub mod ritual;
pub mod storage;

pub use advice::{Advisor, BreakfastAdvice, HttpAdvisor, OfflineAdvisor, Suggestion, Tip, TipCategory};
pub use app::App;
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{AdviceError, AlarmError, ConfigError, CoreError, RitualError, StorageError, ValidationError};
pub use events::Event;
pub use history::{HistoryStore, SymptomEntry, UserProfile, WeightEntry};
pub use report::MedicalReport;
pub use ritual::{AlarmPlayer, RitualPhase, RitualTimer, DEFAULT_WAIT_MINUTES};
pub use storage::{Config, Database, KvStore, MemoryStore};
