pub mod classifier;
pub mod medical;
pub mod metrics;
pub mod providers;

pub use classifier::SymptomClassifier;
pub use medical::MedicalDatabase;
pub use metrics::{get_metrics, init_metrics};
pub use providers::{CompletionProvider, ProviderError};
