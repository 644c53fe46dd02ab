mod capability;
mod common;
