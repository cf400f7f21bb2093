//! Campus navigation CLI library.
//!
//! Terminal styling and output rendering shared by the `campusnav-cli`
//! binary.

pub mod output;
pub mod terminal;
