//! Farcaster Cast Launcher
//!
//! Turns a Farcaster cast into a token launch on Base: a cast that mentions
//! `@launcher launch $TICKER` gets a frame reply, the frame shows the launch
//! state of the cast, and its transaction button hands the user's wallet a
//! `launch` call carrying a signed list of the author's verified addresses.

pub mod auth;
pub mod chain;
pub mod cli;
pub mod config;
pub mod errors;
pub mod frame;
pub mod notifier;
pub mod server;
pub mod social;
pub mod ticker;
pub mod types;
pub mod workflow;
