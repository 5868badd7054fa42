#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod bitboard;
mod board;
mod common;
mod config;
mod game;
mod placer;
mod resolver;
mod ship;
mod targeter;
#[cfg(feature = "std")]
pub mod cli;
#[cfg(feature = "std")]
mod controller;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod scheduler;

pub use bitboard::{BitBoard, Cells};
pub use board::*;
pub use common::*;
pub use config::*;
pub use game::*;
pub use placer::*;
pub use resolver::*;
pub use ship::*;
pub use targeter::*;
#[cfg(feature = "std")]
pub use controller::MatchController;
#[cfg(feature = "std")]
pub use logging::{init_logging, parse_level};
#[cfg(feature = "std")]
pub use scheduler::{ManualScheduler, Scheduler, TaskHandle, TokioScheduler};
