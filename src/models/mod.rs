pub mod record;
pub mod settings;
pub mod view;

#[cfg(test)]
mod tests;

pub use record::*;
pub use settings::*;
pub use view::*;
