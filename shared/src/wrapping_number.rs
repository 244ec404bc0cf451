use crate::Tick;

const HALF_RANGE: u32 = 1 << 31;

/// Whether tick `s1` comes after `s2`, treating the tick counter as a ring
/// so that a tick just past the wrap is newer than one just before it
pub fn sequence_greater_than(s1: Tick, s2: Tick) -> bool {
    s1 != s2 && s1.wrapping_sub(s2) < HALF_RANGE
}
