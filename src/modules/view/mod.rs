pub mod document;
pub mod info_sheet;
pub mod renderer;
pub mod shell;
