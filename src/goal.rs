// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregator::DISPLAY_CAP_PERCENT;
use crate::models::Goal;
use rust_decimal::Decimal;

/// Goal progress follows the net balance; a negative balance counts as
/// nothing saved.
pub fn recompute(goal: Option<&mut Goal>, balance: Decimal) {
    if let Some(goal) = goal {
        goal.saved = balance.max(Decimal::ZERO);
    }
}

/// Raw progress, may exceed 100.
pub fn progress_percent(goal: &Goal) -> Decimal {
    if goal.target > Decimal::ZERO {
        goal.saved / goal.target * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    }
}

pub fn display_percent(goal: &Goal) -> Decimal {
    progress_percent(goal).min(DISPLAY_CAP_PERCENT)
}

pub fn is_reached(goal: &Goal) -> bool {
    progress_percent(goal) >= Decimal::ONE_HUNDRED
}

pub fn caption(goal: &Goal) -> String {
    if is_reached(goal) {
        "Goal reached! Time to celebrate wisely.".to_string()
    } else {
        format!(
            "You are {:.1}% of the way to your goal.",
            display_percent(goal)
        )
    }
}
