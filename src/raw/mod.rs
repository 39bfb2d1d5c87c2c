mod balance;
mod node;
mod raw_index;

pub(crate) use node::{Color, Node};
pub(crate) use raw_index::RawIndex;
