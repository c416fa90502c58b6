pub use self::normalize::{Normalizer, NormalizerConfig, Temporal};
pub use self::parents::{NodeId, ParentTable};
pub use self::tree::{Preorder, Tree};

pub mod category;
pub mod normalize;
mod parents;
mod tree;
