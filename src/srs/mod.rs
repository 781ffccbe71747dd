pub mod review_schedule;
pub mod study_session;

pub use review_schedule::{is_due, partition_due, DueBuckets, ReviewStatus};
pub use study_session::{
  session_score, Answered, SessionError, SessionPhase, SessionSummary, SessionTally, StudySession,
};
