//! SKYFIRE headless runner: frame pacing and a scripted input producer.

pub mod game_loop;
pub mod pilot;
