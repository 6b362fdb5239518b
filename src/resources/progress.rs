//! Pickup progress tracking.
//!
//! [`ProgressTracker`] aggregates the session's pickup bookkeeping: how many
//! pickups exist, how many were collected, score, resources and the derived
//! completion percentage. It is an ECS resource, so every consumer gets it
//! as an explicit system parameter; there is no global lookup.
//!
//! The mutators are plain methods returning what happened. The
//! [`observe_pickup_collected`](crate::events::pickup::observe_pickup_collected)
//! observer turns those outcomes into events.

use bevy_ecs::prelude::Resource;

/// What a single `report_collected` call changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollectionReport {
    pub score: i32,
    pub score_gained: i32,
    pub total_resources: i32,
    pub resource_value: i32,
    pub completion_percent: f32,
    /// `Some(percent)` on the one call that completes the session.
    pub game_completed: Option<f32>,
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ProgressTracker {
    total_pickups: i32,
    pickups_collected: i32,
    score: i32,
    total_resources: i32,
    completion_percent: f32,
    points_per_resource: i32,
    completion_announced: bool,
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new(10)
    }
}

impl ProgressTracker {
    pub fn new(points_per_resource: i32) -> Self {
        Self {
            total_pickups: 0,
            pickups_collected: 0,
            score: 0,
            total_resources: 0,
            completion_percent: 0.0,
            points_per_resource,
            completion_announced: false,
        }
    }

    pub fn total_pickups(&self) -> i32 {
        self.total_pickups
    }

    pub fn pickups_collected(&self) -> i32 {
        self.pickups_collected
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn total_resources(&self) -> i32 {
        self.total_resources
    }

    pub fn completion_percent(&self) -> f32 {
        self.completion_percent
    }

    pub fn is_complete(&self) -> bool {
        self.completion_announced
    }

    /// Count one more pickup in the level.
    pub fn register_pickup(&mut self) {
        self.total_pickups = self.total_pickups.saturating_add(1);
        self.update_completion_percent();
    }

    /// Add points and return the new score. Saturates at the `i32` bounds.
    pub fn add_score(&mut self, points: i32) -> i32 {
        self.score = self.score.saturating_add(points);
        self.score
    }

    /// Add collected resources and return the new total.
    pub fn add_resource(&mut self, resource_value: i32) -> i32 {
        self.total_resources = self.total_resources.saturating_add(resource_value);
        self.total_resources
    }

    /// Record a collected pickup worth `resource_value`.
    ///
    /// The completion outcome is reported exactly once per session, on the
    /// call that first brings `pickups_collected` up to `total_pickups`.
    pub fn report_collected(&mut self, resource_value: i32) -> CollectionReport {
        self.pickups_collected = self.pickups_collected.saturating_add(1);
        let score_gained = resource_value.saturating_mul(self.points_per_resource);
        let score = self.add_score(score_gained);
        let total_resources = self.add_resource(resource_value);
        self.update_completion_percent();

        let mut game_completed = None;
        if !self.completion_announced
            && self.total_pickups > 0
            && self.pickups_collected >= self.total_pickups
        {
            self.completion_announced = true;
            game_completed = Some(self.completion_percent);
        }

        CollectionReport {
            score,
            score_gained,
            total_resources,
            resource_value,
            completion_percent: self.completion_percent,
            game_completed,
        }
    }

    /// Recompute the completion percentage, clamped to `[0, 100]`.
    pub fn update_completion_percent(&mut self) {
        self.completion_percent = if self.total_pickups > 0 {
            (self.pickups_collected as f32 / self.total_pickups as f32 * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tracker_reports_zero_percent() {
        let tracker = ProgressTracker::default();
        assert_eq!(tracker.completion_percent(), 0.0);
        assert_eq!(tracker.total_pickups(), 0);
    }

    #[test]
    fn five_pickups_worth_two_each() {
        let mut tracker = ProgressTracker::default();
        for _ in 0..5 {
            tracker.register_pickup();
        }
        let completions: Vec<_> = (0..5)
            .filter_map(|_| tracker.report_collected(2).game_completed)
            .collect();

        assert_eq!(tracker.score(), 100);
        assert_eq!(tracker.total_resources(), 10);
        assert_eq!(tracker.pickups_collected(), 5);
        assert_eq!(tracker.completion_percent(), 100.0);
        assert_eq!(completions, vec![100.0]);
    }

    #[test]
    fn completion_fires_once_for_three() {
        let mut tracker = ProgressTracker::default();
        for _ in 0..3 {
            tracker.register_pickup();
        }
        let fired = (0..3)
            .filter(|_| tracker.report_collected(1).game_completed.is_some())
            .count();
        assert_eq!(fired, 1);
        assert!(tracker.is_complete());
    }

    #[test]
    fn collecting_without_registered_pickups_never_completes() {
        let mut tracker = ProgressTracker::default();
        let report = tracker.report_collected(4);
        assert_eq!(report.game_completed, None);
        assert_eq!(report.completion_percent, 0.0);
        assert_eq!(report.score, 40);
    }

    #[test]
    fn percent_stays_in_range_while_registering() {
        let mut tracker = ProgressTracker::default();
        tracker.register_pickup();
        tracker.register_pickup();
        tracker.report_collected(1);
        assert_eq!(tracker.completion_percent(), 50.0);
        tracker.register_pickup();
        let p = tracker.completion_percent();
        assert!((0.0..=100.0).contains(&p));
        assert!((p - 100.0 / 3.0).abs() < 1e-4);
    }

    #[test]
    fn custom_points_per_resource() {
        let mut tracker = ProgressTracker::new(3);
        tracker.register_pickup();
        let report = tracker.report_collected(4);
        assert_eq!(report.score_gained, 12);
        assert_eq!(report.game_completed, Some(100.0));
    }

    #[test]
    fn huge_pickup_values_saturate() {
        let mut tracker = ProgressTracker::new(10);
        tracker.register_pickup();
        tracker.register_pickup();
        let report = tracker.report_collected(300_000_000);
        assert_eq!(report.score_gained, i32::MAX);
        assert_eq!(report.score, i32::MAX);
        assert_eq!(report.total_resources, 300_000_000);

        let report = tracker.report_collected(i32::MAX);
        assert_eq!(report.score, i32::MAX);
        assert_eq!(report.total_resources, i32::MAX);
        assert_eq!(report.game_completed, Some(100.0));
    }
}
