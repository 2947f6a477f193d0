//! Feeding target partitioning.
//!
//! Pure helpers behind the target resolver: splitting a schedule's target
//! rows by type so each type can be resolved with one batched query, and
//! grouping rack-level targets by rack.

use std::collections::HashMap;

use uuid::Uuid;

use crate::models::feeding::TargetRef;

/// A schedule's targets split by type, ready for batched resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionedTargets {
    pub reptile_ids: Vec<Uuid>,
    pub location_ids: Vec<Uuid>,
    pub room_ids: Vec<Uuid>,
    pub rack_ids: Vec<Uuid>,
    pub level_targets: Vec<(Uuid, i32)>,
}

impl PartitionedTargets {
    pub fn is_empty(&self) -> bool {
        self.reptile_ids.is_empty()
            && self.location_ids.is_empty()
            && self.room_ids.is_empty()
            && self.rack_ids.is_empty()
            && self.level_targets.is_empty()
    }
}

/// Result of target resolution: the reptile set plus any sub-query
/// failures that degraded to an empty contribution.
#[derive(Debug, Clone, Default)]
pub struct ResolvedTargets {
    pub reptile_ids: Vec<Uuid>,
    pub warnings: Vec<String>,
}

/// Splits target references by type.
pub fn partition_targets(targets: &[TargetRef]) -> PartitionedTargets {
    let mut partitioned = PartitionedTargets::default();
    for target in targets {
        match *target {
            TargetRef::Reptile { reptile_id } => partitioned.reptile_ids.push(reptile_id),
            TargetRef::Location { location_id } => partitioned.location_ids.push(location_id),
            TargetRef::Room { room_id } => partitioned.room_ids.push(room_id),
            TargetRef::Rack { rack_id } => partitioned.rack_ids.push(rack_id),
            TargetRef::Level {
                rack_id,
                shelf_level,
            } => partitioned.level_targets.push((rack_id, shelf_level)),
        }
    }
    partitioned
}

/// Groups level targets by rack so each rack needs one location lookup
/// (`rack_id = X AND shelf_level = ANY(levels)`).
pub fn group_levels_by_rack(levels: &[(Uuid, i32)]) -> HashMap<Uuid, Vec<i32>> {
    let mut grouped: HashMap<Uuid, Vec<i32>> = HashMap::new();
    for &(rack_id, level) in levels {
        let entry = grouped.entry(rack_id).or_default();
        if !entry.contains(&level) {
            entry.push(level);
        }
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_mixed_targets() {
        let reptile_id = Uuid::new_v4();
        let room_id = Uuid::new_v4();
        let rack_id = Uuid::new_v4();

        let targets = vec![
            TargetRef::Reptile { reptile_id },
            TargetRef::Room { room_id },
            TargetRef::Level {
                rack_id,
                shelf_level: 2,
            },
            TargetRef::Level {
                rack_id,
                shelf_level: 3,
            },
        ];

        let partitioned = partition_targets(&targets);
        assert_eq!(partitioned.reptile_ids, vec![reptile_id]);
        assert_eq!(partitioned.room_ids, vec![room_id]);
        assert!(partitioned.location_ids.is_empty());
        assert!(partitioned.rack_ids.is_empty());
        assert_eq!(
            partitioned.level_targets,
            vec![(rack_id, 2), (rack_id, 3)]
        );
    }

    #[test]
    fn test_partition_empty() {
        let partitioned = partition_targets(&[]);
        assert!(partitioned.is_empty());
    }

    #[test]
    fn test_group_levels_batches_per_rack() {
        let rack_a = Uuid::new_v4();
        let rack_b = Uuid::new_v4();

        // Both racks have a "level 2": grouping must keep them apart so
        // rack B's level 2 never pulls in rack A's reptiles.
        let grouped = group_levels_by_rack(&[(rack_a, 2), (rack_a, 5), (rack_b, 2)]);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[&rack_a], vec![2, 5]);
        assert_eq!(grouped[&rack_b], vec![2]);
    }

    #[test]
    fn test_group_levels_dedupes_within_rack() {
        let rack = Uuid::new_v4();
        let grouped = group_levels_by_rack(&[(rack, 1), (rack, 1), (rack, 1)]);
        assert_eq!(grouped[&rack], vec![1]);
    }
}
