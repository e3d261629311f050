//! Default value functions for serde deserialization.

pub fn resolution() -> f32 {
    0.1
}

pub fn max_range() -> f32 {
    250.0
}

pub fn min_z() -> f32 {
    -2.0
}

pub fn max_z() -> f32 {
    7.0
}

pub fn sigma() -> f32 {
    5.0
}

pub fn visibility_threshold() -> f32 {
    5.0
}

pub fn travel_weight() -> f32 {
    0.6
}

pub fn bound_weight() -> f32 {
    0.4
}

pub fn visibility_weight() -> f32 {
    0.3
}

pub fn no_touch_distance() -> f32 {
    0.5
}

pub fn occlusion_sample_threshold() -> usize {
    500_000
}

pub fn quality_sample_count() -> usize {
    5
}

pub fn region_grow_radius() -> f32 {
    0.5
}

pub fn bound_defend_rate() -> f32 {
    1.5
}

pub fn initial_radius() -> f32 {
    4.5
}

pub fn quality_radius() -> f32 {
    1.0
}

pub fn boundary_cap() -> usize {
    3_000_000
}

pub fn obstacle_cap() -> usize {
    8_000_000
}

pub fn downsample_stride() -> usize {
    2
}

pub fn point_sample_stride() -> usize {
    1
}

pub fn ground_obstacle_threshold() -> usize {
    20
}

pub fn odometry_raw_hz() -> f32 {
    50.0
}

pub fn sampling_hz() -> f32 {
    2.0
}

pub fn past_view_duration() -> f32 {
    5.0
}

pub fn full_cycle_interval() -> u32 {
    3
}
