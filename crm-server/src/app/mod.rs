pub mod import_use_case;

pub use import_use_case::ImportUseCase;
