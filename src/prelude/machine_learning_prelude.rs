pub use crate::machine_learning::imperialist_competitive::{ImperialistCompetitive, SearchResult};
pub use crate::machine_learning::rbf_network::{RBFNetwork, activation_matrix};
