//! Skeleton topology for the 33-point BlazePose layout.

use crate::pose::LandmarkIndex;

const fn edge(a: u32, b: u32) -> (LandmarkIndex, LandmarkIndex) {
    (LandmarkIndex(a), LandmarkIndex(b))
}

/// Bone connections drawn between landmarks, as (start, end) index pairs.
pub const POSE_CONNECTIONS: [(LandmarkIndex, LandmarkIndex); 35] = [
    // Face
    edge(0, 1),
    edge(1, 2),
    edge(2, 3),
    edge(3, 7),
    edge(0, 4),
    edge(4, 5),
    edge(5, 6),
    edge(6, 8),
    edge(9, 10),
    // Torso and arms
    edge(11, 12),
    edge(11, 13),
    edge(13, 15),
    edge(15, 17),
    edge(15, 19),
    edge(15, 21),
    edge(17, 19),
    edge(12, 14),
    edge(14, 16),
    edge(16, 18),
    edge(16, 20),
    edge(16, 22),
    edge(18, 20),
    edge(11, 23),
    edge(12, 24),
    edge(23, 24),
    // Legs
    edge(23, 25),
    edge(24, 26),
    edge(25, 27),
    edge(26, 28),
    edge(27, 29),
    edge(28, 30),
    edge(29, 31),
    edge(30, 32),
    edge(27, 31),
    edge(28, 32),
];
