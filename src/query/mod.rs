pub mod page;
pub mod search;

pub use page::Page;
pub use search::SearchTerm;
