pub mod login_prompt;

pub use login_prompt::{read_submission, show_failure, show_success, Submission};
