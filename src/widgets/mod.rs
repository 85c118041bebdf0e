pub mod disclaimer;
pub mod nav;
