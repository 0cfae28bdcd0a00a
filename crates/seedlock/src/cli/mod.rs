pub mod seedlock;
