pub mod config;
pub mod hash;
pub mod inspect;
pub mod misc;
pub mod verify;
