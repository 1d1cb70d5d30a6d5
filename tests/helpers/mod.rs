#![allow(dead_code)]

pub mod context_helpers;
pub mod diagnostic_helpers;
pub mod source_fixtures;
