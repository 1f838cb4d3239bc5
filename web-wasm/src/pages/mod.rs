pub mod about;
pub mod dashboard;
pub mod dataset;
pub mod methodology;
pub mod publications;
