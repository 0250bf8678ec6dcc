pub mod checker;
pub mod error;
pub mod pause;
pub mod progress;
pub mod queue;
pub mod result;
pub mod store;
pub mod validator;

pub use checker::Checker;
pub use error::ScanError;
pub use pause::PauseToken;
pub use progress::{NoopReporter, ProgressReporter, ProgressUpdate, SharedReporter};
pub use queue::{TraversalOrder, UrlQueue};
pub use result::{CheckResults, StatusHistogram, StatusRecord};
pub use store::{FailureRecording, RecordStore};
pub use validator::{HttpValidator, Observation, Validator};
