pub mod champion_stats;
pub mod recommender;
