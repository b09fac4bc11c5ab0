pub mod event;
pub mod form;
pub mod report;

pub use event::{BehaviorEvent, InteractionEvent, NewBehavior, NewInteraction, NewUpload, UploadEvent};
pub use form::{BehaviorForm, InteractionForm, UploadForm};
pub use report::{InteractionReport, UploadReport};
