pub mod search;
pub mod url;
