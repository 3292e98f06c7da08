pub mod report;
pub mod shell;
