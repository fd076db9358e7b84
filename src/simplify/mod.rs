//! Graph simplification: tip and bubble removal.
//!
//! Both passes follow the same shape: find candidate paths, reconstitute
//! their k-mers, delete them from `M`, then rebuild `G+`/`G-` once at the
//! end (see I4). Neither pass mutates adjacency directly.

mod bubbles;
mod tips;

pub use bubbles::{find_bubble_arms, remove_bubbles};
pub use tips::{find_all_tips, remove_tips};
