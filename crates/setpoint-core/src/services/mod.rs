//! High-level services shared across clients

mod library;

pub use library::DrillLibraryService;
