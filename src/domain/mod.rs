mod book;

pub use book::{Book, BookDetails, ValidationError};
