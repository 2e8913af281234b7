//! Nodes: delayed computational units wired between wires.
//!
//! A node observes input wires through the agenda, so every reaction runs
//! exactly one node delay after the change that caused it, then writes
//! its result to an output wire.
//!
//! # Module structure
//!
//! | Sub-module | Contents |
//! |---|---|
//! | [`traits`] | [`Node`] trait, [`NodeCore`], [`spawn`] |
//! | [`unary`] | [`Unary`] |
//! | [`binary`] | [`Binary`] |
//! | [`nary`] | [`Nary`] |
//! | [`builtin`] | gates, adders, [`Counter`], selectors, neuron |

pub mod binary;
pub mod builtin;
pub mod nary;
pub mod traits;
pub mod unary;

pub use binary::Binary;
pub use builtin::{Counter, FullAdder, HalfAdder};
pub use nary::Nary;
pub use traits::{spawn, Node, NodeCore};
pub use unary::Unary;

#[cfg(test)]
mod tests;
