//! UI components

pub mod dialog;
mod dialog_helpers;
pub mod help;
pub mod panel;
pub mod status;
pub mod theme;

pub use dialog::{ChoiceDialog, FileNameDialog, InfoDialog, MessageDialog};
pub use help::HelpViewer;
pub use panel::{ListingWidget, SelectionWidget};
pub use status::{HeaderBar, StatusBar};
pub use theme::Theme;
pub use theme::ThemeConfig;
