//! Target descriptions and boilerplate text shared across missions.

/// Default attack target: whichever unwounded hero is closest.
pub const TARGET_HERO_CLOSEST_UNWOUNDED: &str = "the closest unwounded hero";

/// Attack/move target once a single hero remains.
pub const TARGET_REMAINING: &str = "the last remaining hero";

/// Standard pointer to the printed mission guide.
pub const REFER_MISSION_GUIDE: &str = "Refer to the mission guide for full details.";
