pub mod config;
pub mod page;
pub mod store;
pub mod theme;
pub mod types;
pub mod view;
pub mod widgets;

#[cfg(test)]
mod test_helpers;
