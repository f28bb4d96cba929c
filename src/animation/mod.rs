pub mod element;
pub mod spring;
pub mod style;
pub mod transition;
