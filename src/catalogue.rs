/// A point-earning CPD activity
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Activity {
    pub(crate) id: &'static str,
    pub(crate) description: &'static str,
    pub(crate) comments: &'static str,
    pub(crate) points: u32,
}

static CATALOGUE: [Activity; 4] = [
    Activity {
        id: "1",
        description: "Subscription to a marine publication, journal or magazine",
        comments: "Receipt of regular professional or industry updates.",
        points: 1,
    },
    Activity {
        id: "2",
        description: "Attendance at marine industry conference",
        comments: "Minimum 4 hours attendance required.",
        points: 2,
    },
    Activity {
        id: "3",
        description: "Completion of online training course",
        comments: "Certified course with assessment.",
        points: 3,
    },
    Activity {
        id: "4",
        description: "Professional development workshop",
        comments: "Full day workshop attendance.",
        points: 4,
    },
];

/// Every activity that earns points, including those claimed by other means
static POINTS_TABLE: [Activity; 9] = [
    Activity {
        id: "1",
        description: "Other forms of ad hoc CPD for items not listed will be considered and points awarded accordingly",
        comments: "Details will be required and up to 4 points may be awarded",
        points: 4,
    },
    Activity {
        id: "2",
        description: "Subscription to a marine publication, journal or magazine",
        comments: "Receipt of regular professional or industry updates. Maximum two per year permitted",
        points: 1,
    },
    Activity {
        id: "3",
        description: "Visiting a technical exhibition, or other recognised maritime related show",
        comments: "Maximum two per year permitted",
        points: 1,
    },
    Activity {
        id: "4",
        description: "Attendance at an appropriate marine industry networking event",
        comments: "Maximum two per year permitted",
        points: 1,
    },
    Activity {
        id: "5",
        description: "Researching a relevant technical subject, seeking advice on technical helplines or viewing relevant online videos",
        comments: "Maximum two per year permitted",
        points: 2,
    },
    Activity {
        id: "6",
        description: "Purchase of an IIMS handy guide",
        comments: "Maximum two per year permitted",
        points: 2,
    },
    Activity {
        id: "7",
        description: "Attendance at marine industry conference",
        comments: "Minimum 4 hours attendance required",
        points: 2,
    },
    Activity {
        id: "8",
        description: "Completion of online training course",
        comments: "Certified course with assessment",
        points: 3,
    },
    Activity {
        id: "9",
        description: "Professional development workshop",
        comments: "Full day workshop attendance",
        points: 4,
    },
];

/// The activity catalogue, cheapest first
pub(crate) fn activities() -> Vec<Activity> {
    by_points(&CATALOGUE)
}

/// The reference table of point-earning activities, cheapest first
pub(crate) fn points_table() -> Vec<Activity> {
    by_points(&POINTS_TABLE)
}

// Stable, so activities worth the same keep their listed order
fn by_points(table: &[Activity]) -> Vec<Activity> {
    let mut activities = table.to_vec();
    activities.sort_by_key(|a| a.points);
    activities
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_by_points() {
        let acts = activities();
        assert_eq!(acts.len(), 4);
        assert!(acts.windows(2).all(|w| w[0].points <= w[1].points));
        assert_eq!(acts[0].id, "1");
        assert_eq!(acts[3].description, "Professional development workshop");
    }

    #[test]
    fn test_points_table() {
        let table = points_table();
        assert_eq!(table.len(), 9);
        assert!(table.windows(2).all(|w| w[0].points <= w[1].points));
        let ids = table.iter().map(|a| a.id).collect::<Vec<_>>();
        assert_eq!(ids, ["2", "3", "4", "5", "6", "7", "8", "1", "9"]);
        assert_eq!(
            table[0].comments,
            "Receipt of regular professional or industry updates. Maximum two per year permitted"
        );
    }
}
