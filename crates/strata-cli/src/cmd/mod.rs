pub mod keys;
pub mod scaffold;
