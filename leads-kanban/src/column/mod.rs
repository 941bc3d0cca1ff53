//! Column commands

mod add;
mod delete;
mod list;
mod restore;

pub use add::AddColumn;
pub use delete::DeleteColumn;
pub use list::ListColumns;
pub use restore::RestoreColumn;
