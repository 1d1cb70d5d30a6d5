#[path = "helpers/mod.rs"]
mod helpers;

#[path = "context/mod.rs"]
mod context;

#[path = "diagnostics/mod.rs"]
mod diagnostics;
