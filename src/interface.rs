//! The edges of the system: documents coming in, edit forms coming back, and
//! CSV going out.

mod export;
pub mod submission;
mod upload;

pub use export::{DEFAULT_FILE_NAME, HEADER, to_csv, write_csv};
pub use submission::{EditSubmission, ROW_COUNT_FIELD, SubmissionError};
pub use upload::{UNNAMED_DOCUMENT, Upload, decode_permissive};
