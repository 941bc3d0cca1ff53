//! Lead commands

mod delete;
mod mv;

pub use delete::DeleteLead;
pub use mv::MoveLead;
