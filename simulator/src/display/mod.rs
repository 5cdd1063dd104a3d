pub mod console;
pub mod format;
pub mod model;

pub use console::Console;
pub use model::{DisplayModel, RouteView};
