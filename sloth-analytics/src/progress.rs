/// Default number of blocks in the progress bar.
pub const DEFAULT_BAR_LENGTH: i64 = 17;

/// XP required to finish the given level: `(level + 1)^5`.
pub fn xp_goal(level: i64) -> i64 {
    (level + 1).pow(5)
}

/// Level a user's XP entitles them to: the integer fifth root of their XP.
pub fn level_from_xp(xp: i64) -> i64 {
    if xp <= 0 {
        return 0;
    }

    (xp as f64).powf(1.0 / 5.0) as i64
}

/// Emoji progress bar towards the next level, with a level header line.
pub fn progress_bar(level: i64, xp: i64, goal_xp: i64, bar_length: i64) -> String {
    let bar_length = bar_length.max(1);
    let percentage = if goal_xp > 0 {
        ((xp as f64 / goal_xp as f64) * 100.0) as i64
    } else {
        0
    };
    let boxes = ((percentage * bar_length) / 100).clamp(0, bar_length);

    format!(
        "> 📊 **Level**: {} ({}xp / {}xp) {}%\n> {}{}",
        level,
        xp,
        goal_xp,
        percentage,
        ":blue_square:".repeat(boxes as usize),
        ":white_large_square:".repeat((bar_length - boxes) as usize),
    )
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_BAR_LENGTH, level_from_xp, progress_bar, xp_goal};

    #[test]
    fn xp_goals_follow_the_level_curve() {
        assert_eq!(xp_goal(0), 1);
        assert_eq!(xp_goal(1), 32);
        assert_eq!(xp_goal(2), 243);
        assert_eq!(xp_goal(4), 3125);
    }

    #[test]
    fn levels_are_the_integer_fifth_root() {
        assert_eq!(level_from_xp(0), 0);
        assert_eq!(level_from_xp(31), 1);
        assert_eq!(level_from_xp(32), 2);
        assert_eq!(level_from_xp(3124), 4);
    }

    #[test]
    fn half_full_bar() {
        let bar = progress_bar(2, 50, 100, 10);
        assert!(bar.starts_with("> 📊 **Level**: 2 (50xp / 100xp) 50%"));
        assert_eq!(bar.matches(":blue_square:").count(), 5);
        assert_eq!(bar.matches(":white_large_square:").count(), 5);
    }

    #[test]
    fn bar_never_overflows_its_length() {
        let bar = progress_bar(1, 500, 100, DEFAULT_BAR_LENGTH);
        assert_eq!(
            bar.matches(":blue_square:").count(),
            DEFAULT_BAR_LENGTH as usize
        );
        assert_eq!(bar.matches(":white_large_square:").count(), 0);
    }
}
