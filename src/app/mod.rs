// Application layer: presentation helpers for the command-line front end.

pub mod export;
