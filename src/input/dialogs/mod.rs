//! Dialog mode handlers

mod choice;
mod file_name;

pub use choice::{handle_choice_mode, handle_dismiss_mode};
pub use file_name::handle_file_name_mode;
