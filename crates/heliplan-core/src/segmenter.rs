//! Route segmentation into landing stops and legs.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, PlanWarning};
use crate::models::{StopRef, Waypoint};

/// Flight between two consecutive landing stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    /// Index of the departure stop among landing stops
    pub departure_index: usize,
    pub departure_stop: Waypoint,
    pub arrival_stop: Waypoint,
    pub intermediate_waypoints: Vec<Waypoint>,
}

impl Leg {
    /// Points flown in order: departure, intermediates, arrival.
    pub fn points(&self) -> impl Iterator<Item = &Waypoint> {
        std::iter::once(&self.departure_stop)
            .chain(self.intermediate_waypoints.iter())
            .chain(std::iter::once(&self.arrival_stop))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSegmentation {
    pub legs: Vec<Leg>,
    /// Landing stops in route order
    pub actual_stops: Vec<Waypoint>,
    pub warnings: Vec<PlanWarning>,
}

impl RouteSegmentation {
    pub fn stop_ref(&self, index: usize) -> Option<StopRef> {
        self.actual_stops.get(index).map(|stop| StopRef {
            id: stop.id.clone(),
            name: stop.name.clone(),
            index,
        })
    }

    /// Landing stops strictly between departure and destination.
    pub fn intermediate_stop_count(&self) -> usize {
        self.actual_stops.len().saturating_sub(2)
    }
}

/// Split an ordered point list into legs.
///
/// A point is a landing stop unless tagged as a navigation waypoint. Navigation
/// waypoints before the first stop are dropped with a warning; a trailing leg
/// with no arrival stop is not emitted.
pub fn segment_route(points: &[Waypoint]) -> Result<RouteSegmentation, EngineError> {
    let mut legs = Vec::new();
    let mut actual_stops: Vec<Waypoint> = Vec::new();
    let mut warnings = Vec::new();
    let mut in_progress: Option<(usize, Waypoint, Vec<Waypoint>)> = None;

    for point in points {
        if point.is_landing_stop() {
            if let Some((departure_index, departure_stop, intermediate_waypoints)) =
                in_progress.take()
            {
                legs.push(Leg {
                    departure_index,
                    departure_stop,
                    arrival_stop: point.clone(),
                    intermediate_waypoints,
                });
            }
            in_progress = Some((actual_stops.len(), point.clone(), Vec::new()));
            actual_stops.push(point.clone());
            continue;
        }

        match in_progress.as_mut() {
            Some((_, _, intermediates)) => intermediates.push(point.clone()),
            None => {
                tracing::warn!(
                    waypoint_id = %point.id,
                    "Dropping navigation waypoint before first landing stop"
                );
                warnings.push(PlanWarning::AmbiguousLeadingWaypoint {
                    waypoint_id: point.id.clone(),
                });
            }
        }
    }

    if let Some((_, stop, trailing)) = in_progress {
        if !trailing.is_empty() {
            tracing::debug!(
                stop_id = %stop.id,
                dropped = trailing.len(),
                "Ignoring navigation waypoints after destination"
            );
        }
    }

    if actual_stops.len() < 2 {
        return Err(EngineError::InsufficientRouteLength {
            landing_stops: actual_stops.len(),
        });
    }

    Ok(RouteSegmentation {
        legs,
        actual_stops,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(points: &[Waypoint]) -> Vec<&str> {
        points.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn groups_waypoints_between_stops() {
        let route = vec![
            Waypoint::stop("A", "Aberdeen", -2.2, 57.2),
            Waypoint::nav("w1", "W1", -1.5, 57.3),
            Waypoint::nav("w2", "W2", -1.0, 57.4),
            Waypoint::stop("B", "Bravo", 0.0, 57.5),
            Waypoint::stop("C", "Charlie", 1.0, 57.6),
        ];
        let seg = segment_route(&route).unwrap();

        assert_eq!(seg.legs.len(), 2);
        assert_eq!(ids(&seg.actual_stops), vec!["A", "B", "C"]);
        assert_eq!(ids(&seg.legs[0].intermediate_waypoints), vec!["w1", "w2"]);
        assert!(seg.legs[1].intermediate_waypoints.is_empty());
        assert_eq!(seg.legs[1].departure_index, 1);
        assert_eq!(seg.legs[1].arrival_stop.id, "C");
        assert_eq!(seg.intermediate_stop_count(), 1);
        assert!(seg.warnings.is_empty());
    }

    #[test]
    fn leg_points_are_in_flight_order() {
        let route = vec![
            Waypoint::stop("A", "A", 0.0, 0.0),
            Waypoint::nav("w", "W", 0.5, 0.0),
            Waypoint::stop("B", "B", 1.0, 0.0),
        ];
        let seg = segment_route(&route).unwrap();
        let order: Vec<&str> = seg.legs[0].points().map(|p| p.id.as_str()).collect();
        assert_eq!(order, vec!["A", "w", "B"]);
    }

    #[test]
    fn leading_navigation_waypoint_is_dropped_with_warning() {
        let route = vec![
            Waypoint::nav("w0", "W0", -3.0, 57.0),
            Waypoint::stop("A", "A", -2.2, 57.2),
            Waypoint::stop("B", "B", 0.0, 57.5),
        ];
        let seg = segment_route(&route).unwrap();
        assert_eq!(seg.legs.len(), 1);
        assert_eq!(seg.legs[0].departure_stop.id, "A");
        assert_eq!(
            seg.warnings,
            vec![PlanWarning::AmbiguousLeadingWaypoint {
                waypoint_id: "w0".to_string()
            }]
        );
    }

    #[test]
    fn trailing_waypoints_do_not_form_a_leg() {
        let route = vec![
            Waypoint::stop("A", "A", 0.0, 0.0),
            Waypoint::stop("B", "B", 1.0, 0.0),
            Waypoint::nav("w", "W", 2.0, 0.0),
        ];
        let seg = segment_route(&route).unwrap();
        assert_eq!(seg.legs.len(), 1);
        assert_eq!(seg.actual_stops.len(), 2);
    }

    #[test]
    fn fewer_than_two_stops_is_an_error() {
        assert_eq!(
            segment_route(&[]),
            Err(EngineError::InsufficientRouteLength { landing_stops: 0 })
        );
        let route = vec![
            Waypoint::stop("A", "A", 0.0, 0.0),
            Waypoint::nav("w", "W", 1.0, 0.0),
        ];
        assert_eq!(
            segment_route(&route),
            Err(EngineError::InsufficientRouteLength { landing_stops: 1 })
        );
    }

    #[test]
    fn stop_refs_follow_landing_order() {
        let route = vec![
            Waypoint::stop("A", "Alpha", 0.0, 0.0),
            Waypoint::nav("w", "W", 0.5, 0.0),
            Waypoint::stop("B", "Bravo", 1.0, 0.0),
        ];
        let seg = segment_route(&route).unwrap();
        let b = seg.stop_ref(1).unwrap();
        assert_eq!(b.id, "B");
        assert_eq!(b.name, "Bravo");
        assert_eq!(b.index, 1);
        assert!(seg.stop_ref(2).is_none());
    }
}
