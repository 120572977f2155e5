pub mod assessment;
pub mod requests;

pub use assessment::{Assessment, Severity};
pub use requests::{ChatRequest, ChatResponse, SearchQuery, SymptomsRequest};
