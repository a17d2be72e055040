mod arena;
mod descent;
mod destroy;
mod handle;
mod insert;
mod node;
mod raw_tree;

pub(crate) use handle::Handle;
pub(crate) use raw_tree::RawTree;
