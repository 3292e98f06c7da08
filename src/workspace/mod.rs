pub mod locator;
pub mod selector;
