pub mod error;
pub mod fields;
pub mod form;
pub mod validation;
pub mod workflow;
