#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod board;
pub mod coord;
pub mod engine;
pub mod event;
pub mod port;
pub mod rules;
pub mod team;
pub mod test_util;
pub mod unit;
