//! Utility functions shared by the rating and balancing code

use crate::types::BalancePlayer;

/// Calculate the absolute difference between two rating sums
pub fn rating_difference(rating1: f64, rating2: f64) -> f64 {
    (rating1 - rating2).abs()
}

/// Sum of the rating means of a team
pub fn team_rating_sum(team: &[BalancePlayer]) -> f64 {
    team.iter().map(|p| p.rating).sum()
}

/// Mean age over the players with age data, 0 when nobody has any
pub fn mean_age(team: &[BalancePlayer]) -> f64 {
    let ages: Vec<f64> = team.iter().filter_map(|p| p.age).collect();
    if ages.is_empty() {
        return 0.0;
    }
    ages.iter().sum::<f64>() / ages.len() as f64
}
