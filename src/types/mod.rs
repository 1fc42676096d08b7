//! Core types for physum

mod channel;
mod classification;
mod condition;
mod diagnostic;
mod participant;
mod reason;
mod record;
mod report;

pub use channel::Channel;
pub use classification::{Classification, ClassificationSource};
pub use condition::{Condition, Valence, Veracity, CONDITION_COLUMNS};
pub use diagnostic::DiagnosticRecord;
pub use participant::{IdSource, ParticipantId, ParticipantMatch};
pub use reason::{join_reasons, ReasonCode, REASON_OK};
pub use record::RawRecord;
pub use report::{ChannelOutcome, RunReport, WrittenOutput};
