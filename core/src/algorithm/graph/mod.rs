//! Maximum flow and minimum cut on capacitated graphs
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod residual;
pub mod augmenting_path;
pub mod augment;
pub mod min_cut;
pub mod max_flow;

pub use self::augment::{Augmentation, FlowAugmenter};
pub use self::augmenting_path::{AugmentingPath, AugmentingPathFinder};
pub use self::max_flow::{run, EdmondsKarp, MaxFlowResult};
pub use self::min_cut::{reachable_set, MinCut, MinCutExtractor};
pub use self::residual::{residual_arcs, Direction, ResidualArc};
