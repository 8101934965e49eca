pub mod elements;
pub mod fonts;
pub mod grid;
pub mod layout;
pub mod renderer;
