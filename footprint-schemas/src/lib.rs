pub mod factors;
pub mod input;
pub mod record;
pub mod view;
