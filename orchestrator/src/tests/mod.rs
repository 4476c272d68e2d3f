pub mod common;

pub mod dispatcher;
