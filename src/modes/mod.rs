pub mod dialog;
pub mod human;

pub use dialog::{DialogOutcome, StartDialog};
pub use human::HumanMode;
