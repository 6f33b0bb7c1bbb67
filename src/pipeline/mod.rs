pub mod extraction; // Free text → symptom set
pub mod vectorize; // Symptom set → feature vector
pub mod service; // Extract → vectorize → classify → rank

pub use service::{PredictionError, PredictionResult, PredictionService, RankedLabel};
