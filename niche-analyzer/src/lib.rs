pub mod aggregator;
pub mod classifier;
pub mod discovery;
pub mod patterns;
pub mod researcher;
pub mod themes;

pub use aggregator::{generate_opportunities, InsightAggregator};
pub use classifier::SignalClassifier;
pub use discovery::{generate_niche_variations, SubredditDiscovery};
pub use researcher::{NicheResearcher, ResearchOutcome};
