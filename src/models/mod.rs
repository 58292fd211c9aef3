pub mod analysis;
pub mod content_option;
pub mod fields;
pub mod product;
pub mod reply;

pub use analysis::{
    AnalysisEvent, AnalysisOutcome, AnalysisRequest, AnalysisStatus, ImageInput, PromptInstruction,
};
pub use content_option::ContentOption;
pub use fields::{ExtractedFields, FieldValue};
pub use product::{DraftRecord, DraftStatus, ProductDraft};
pub use reply::{ClassLabel, ClassificationItem, VisionReply};
