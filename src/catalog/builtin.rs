use super::{Catalog, DistanceEntry, LevelTable};
use crate::levels::Level;

fn table(rows: &[(Level, &[(u32, &[&str])])]) -> LevelTable {
    rows.iter()
        .map(|(level, entries)| {
            let entries = entries
                .iter()
                .map(|(distance, variants)| DistanceEntry::new(*distance, variants))
                .collect();
            (*level, entries)
        })
        .collect()
}

pub fn build() -> Catalog {
    use Level::*;

    let warmups = table(&[
        (
            Beginner,
            &[
                (100, &["100 EASY", "100 IM"]),
                (150, &["50 SWIM/KICK/PULL", "3x50 EZ"]),
            ],
        ),
        (
            Intermediate,
            &[
                (200, &["200 EASY"]),
                (300, &["100 SWIM/KICK/PULL", "3x100 EZ"]),
            ],
        ),
        (
            Advanced,
            &[
                (200, &["200 EASY"]),
                (500, &["500 EASY"]),
                (600, &["200 SWIM/KICK/PULL"]),
            ],
        ),
    ]);

    // Key order is kept as authored: intermediate lists 100 before 50.
    let cooldowns = table(&[
        (
            Beginner,
            &[(50, &["50 COOL DOWN"]), (100, &["100 EASY"])],
        ),
        (
            Intermediate,
            &[(100, &["100 COOL DOWN"]), (50, &["50 EASY"])],
        ),
        (
            Advanced,
            &[(200, &["200 COOL DOWN"]), (100, &["100 EASY"])],
        ),
    ]);

    let drills = table(&[
        (
            Beginner,
            &[(
                200,
                &[
                    "2x100 ZIPPER DRILL",
                    "2x100 CATCH-UP DRILL",
                    "2x100 KICKBOARD",
                    "2x100 STREAMLINE KICK",
                ],
            )],
        ),
        (
            Intermediate,
            &[
                (
                    200,
                    &[
                        "2x100 ZIPPER DRILL",
                        "2x100 CATCH-UP DRILL",
                        "2x100 KICKBOARD",
                        "2x100 STREAMLINE KICK",
                        "2x100 3-3-3",
                    ],
                ),
                (
                    400,
                    &[
                        "4x100 FINGER-TIP DRILL",
                        "4x100 ZIPPER DRILL",
                        "4x100 CATCH-UP DRILL",
                        "4x100 KICKBOARD",
                        "4x100 STREAMLINE KICK",
                        "4x100 3-3-3",
                    ],
                ),
            ],
        ),
        (
            Advanced,
            &[
                (
                    400,
                    &[
                        "4x100 FINGER-TIP DRILL",
                        "4x100 ZIPPER DRILL",
                        "4x100 CATCH-UP DRILL",
                        "4x100 KICKBOARD",
                        "4x100 STREAMLINE KICK",
                        "4x100 3-3-3",
                        "4x100 2KICK-1PULL",
                        "4x100 6-KICK SWITCH",
                    ],
                ),
                (
                    500,
                    &[
                        "5x100 FINGER-TIP DRILL",
                        "5x100 ZIPPER DRILL",
                        "5x100 CATCH-UP DRILL",
                    ],
                ),
            ],
        ),
    ]);

    let main_sets = table(&[
        (
            Beginner,
            &[
                (500, &["5x100 @ 2:00", "5x50 @ 1:30"]),
                (1000, &["10x100 @ 2:00", "10x50 @ 1:30"]),
                (1500, &["15x100 @ 2:00", "15x50 @ 1:30"]),
                (2000, &["20x100 @ 2:00", "20x50 @ 1:30"]),
            ],
        ),
        (
            Intermediate,
            &[
                (500, &["5x100 @ 1:45", "5x50 @ 1:15"]),
                (1000, &["10x100 @ 1:45", "10x50 @ 1:15"]),
                (1500, &["15x100 @ 1:45", "15x50 @ 1:15"]),
                (2000, &["20x100 @ 1:45", "20x50 @ 1:15"]),
            ],
        ),
        (
            Advanced,
            &[
                (500, &["5x100 @ 1:30", "5x50 @ 1:00"]),
                (1000, &["10x100 @ 1:30", "10x50 @ 1:00"]),
                (1500, &["15x100 @ 1:30", "15x50 @ 1:00"]),
                (2000, &["20x100 @ 1:30", "20x50 @ 1:00"]),
            ],
        ),
    ]);

    let fillers = vec![
        DistanceEntry::new(100, &["100 SWIM"]),
        DistanceEntry::new(50, &["50 SWIM"]),
        DistanceEntry::new(25, &["25 SWIM"]),
    ];

    Catalog {
        warmups,
        cooldowns,
        drills,
        main_sets,
        fillers,
    }
}
