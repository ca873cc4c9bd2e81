mod data;
mod token;

pub use data::*;
pub use token::*;
