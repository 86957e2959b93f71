pub mod atom_renderer;
pub mod comments;
pub mod search_index;
