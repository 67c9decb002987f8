//! Scene Catalog Module
//! The five pre-authored New York scenes.

use crate::scene::definition::{
    LineStyle, NoteBox, Phase, PointerNote, Rgb, SceneDefinition, SceneId,
};
use chrono::NaiveDate;

/// Shared vertical scale so every scene is visually comparable.
pub const Y_DOMAIN: (f64, f64) = (0.0, 90_000.0);

const RECESSION: Rgb = Rgb(0xd7, 0x30, 0x27);
const PLATEAU: Rgb = Rgb(0x1c, 0xbc, 0x23);
const FLUCTUATING: Rgb = Rgb(0xff, 0xd8, 0x50);
const SURGE: Rgb = Rgb(0x00, 0x94, 0xff);

const fn day(year: i32, month: u32, dom: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, dom) {
        Some(date) => date,
        None => panic!("invalid calendar date"),
    }
}

const RECESSION_START: NaiveDate = day(2021, 1, 23);
const RECESSION_END: NaiveDate = day(2021, 5, 1);
const PLATEAU_START: NaiveDate = day(2021, 5, 2);
const PLATEAU_END: NaiveDate = day(2021, 8, 8);
const FLUCTUATING_START: NaiveDate = day(2021, 8, 9);
const FLUCTUATING_END: NaiveDate = day(2021, 11, 15);
const SURGE_START: NaiveDate = day(2021, 11, 16);
const SURGE_END: NaiveDate = day(2022, 2, 23);

/// Immutable set of scene definitions, indexed by [`SceneId`].
#[derive(Debug, Clone)]
pub struct SceneCatalog {
    scenes: Vec<SceneDefinition>,
}

impl Default for SceneCatalog {
    fn default() -> Self {
        Self::new_york()
    }
}

impl SceneCatalog {
    pub fn get(&self, id: SceneId) -> &SceneDefinition {
        &self.scenes[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneDefinition> {
        self.scenes.iter()
    }

    pub fn phases() -> Vec<Phase> {
        vec![
            Phase {
                name: "Recession",
                end: RECESSION_END,
                color: RECESSION,
            },
            Phase {
                name: "Plateau",
                end: PLATEAU_END,
                color: PLATEAU,
            },
            Phase {
                name: "Fluctuating",
                end: FLUCTUATING_END,
                color: FLUCTUATING,
            },
            Phase {
                name: "Surge, Plummeting",
                end: SURGE_END,
                color: SURGE,
            },
        ]
    }

    /// Daily New York cases, January 2021 to February 2022.
    pub fn new_york() -> Self {
        let scenes = vec![
            SceneDefinition {
                id: SceneId(1),
                start: RECESSION_START,
                end: RECESSION_END,
                y_domain: Y_DOMAIN,
                line: LineStyle::Solid(RECESSION),
                show_markers: true,
                notes: vec![note(
                    (490.0, 70.0, 560.0, 105.0),
                    (500.0, 90.0),
                    vec![
                        "During the first time period, the line chart of new reported case showed",
                        "recession trend, which decreased from 13909 to 2199 with several vibrations.",
                        "State Government Response: On February 10, 2021, Large capacity",
                        "areas reopen at 10% capacity, effective February 24, with a negative PCR",
                        "test within 72 hours or full COVID-19 vaccination status required to attend.",
                    ],
                )],
                pointers: vec![PointerNote {
                    anchor: day(2021, 3, 24),
                    tail: (-10.0, -40.0),
                    text: (-155.0, -75.0),
                    lines: vec![
                        "The new reported covid case reached a vertex of 20184",
                        "on 2021-03-24 in the first period.",
                    ],
                }],
            },
            SceneDefinition {
                id: SceneId(2),
                start: PLATEAU_START,
                end: PLATEAU_END,
                y_domain: Y_DOMAIN,
                line: LineStyle::Solid(PLATEAU),
                show_markers: true,
                notes: vec![note(
                    (490.0, 70.0, 560.0, 105.0),
                    (500.0, 90.0),
                    vec![
                        "During the second time period, the line chart of new reported case showed",
                        "plateau trend, which is around number of 800.",
                        "State Government Response: On June 13, 2021, All capacity restrictions",
                        "lifted due to 70% of NYers getting at least one shot of the COVID-19 vaccine.",
                        "On June 24, 2021, State of Emergency expires.",
                    ],
                )],
                pointers: vec![PointerNote {
                    anchor: day(2021, 6, 29),
                    tail: (-10.0, -40.0),
                    text: (-155.0, -75.0),
                    lines: vec![
                        "The new reported covid case reached a trough in the second period,",
                        "the lowest point was at 244 cases on 2021-06-29.",
                    ],
                }],
            },
            SceneDefinition {
                id: SceneId(3),
                start: FLUCTUATING_START,
                end: FLUCTUATING_END,
                y_domain: Y_DOMAIN,
                line: LineStyle::Solid(FLUCTUATING),
                show_markers: true,
                notes: vec![note(
                    (490.0, 70.0, 560.0, 125.0),
                    (500.0, 90.0),
                    vec![
                        "During the third time period, the line chart of new reported case shows",
                        "fluctuating trend, which vibrated in a range from 2500 to 7500.",
                        "State Government Response: On August 27, 2021, Gov. Hochul and the New",
                        "York State Department of Health institute a universal mask mandate for all",
                        "public and private schools for students, staff, and faculty in response to the",
                        "emerging Delta variant.",
                    ],
                )],
                pointers: Vec::new(),
            },
            SceneDefinition {
                id: SceneId(4),
                start: SURGE_START,
                end: SURGE_END,
                y_domain: Y_DOMAIN,
                line: LineStyle::Solid(SURGE),
                show_markers: true,
                notes: vec![
                    note(
                        (140.0, 70.0, 360.0, 150.0),
                        (150.0, 90.0),
                        vec![
                            "During the fourth time period, the line chart of",
                            "new reported case showed surge, peak point,",
                            "and plummeting. The whole trend graph was",
                            "same as a normal distirbution.",
                            "State Government Response: On November 27,",
                            "2021, A new pre-emptive State of Emergency is",
                            "declared over Omicron variant.",
                        ],
                    ),
                    note(
                        (810.0, 120.0, 385.0, 185.0),
                        (818.0, 141.0),
                        vec![
                            "State Government Response: On December 20 and",
                            "31, 2021, Gov. Hochul announces two \"Winter Surge",
                            "Plans\", which includes simplified school testing",
                            "regulations, new testing sites, mask and home test",
                            "distribution, and a $65 million fund for county",
                            "governments to support vaccination efforts. Also,",
                            "students are required to be vaccinated and boosted",
                            "by January 15 in order to return to campus, and an",
                            "extension of the mask or vax mandate to February 1.",
                        ],
                    ),
                ],
                pointers: vec![
                    PointerNote {
                        anchor: day(2022, 1, 8),
                        tail: (150.0, 30.0),
                        text: (155.0, 45.0),
                        lines: vec![
                            "The new reported covid case reached the peak at",
                            "90132 on 2022-01-08 for the whole time period.",
                        ],
                    },
                    PointerNote {
                        anchor: day(2021, 12, 25),
                        tail: (25.0, -40.0),
                        text: (25.0, -120.0),
                        lines: vec![
                            "The new reported covid case",
                            "is 0 on 2021-12-25, which is weird.",
                            "I believe this day new york does not",
                            "test and record covid cases, which",
                            "is an outlier.",
                        ],
                    },
                ],
            },
            SceneDefinition {
                id: SceneId(5),
                start: RECESSION_START,
                end: SURGE_END,
                y_domain: Y_DOMAIN,
                line: LineStyle::Phased(Self::phases()),
                show_markers: false,
                notes: vec![note(
                    (360.0, 70.0, 570.0, 105.0),
                    (370.0, 90.0),
                    vec![
                        "With contributions from various government measures, the number of new",
                        "COVID-19 cases decreased gradually in the first half of the period. However,",
                        "due to the rapid spread of the Omicron variant, the numbers demonstrated",
                        "exponential growth. This increase was curtailed after the government",
                        "announced two \"Winter Surge Plans\", which led to a dramatic decline in cases.",
                    ],
                )],
                pointers: Vec::new(),
            },
        ];

        Self { scenes }
    }
}

fn note(
    (x, y, width, height): (f64, f64, f64, f64),
    (text_x, text_y): (f64, f64),
    lines: Vec<&'static str>,
) -> NoteBox {
    NoteBox {
        x,
        y,
        width,
        height,
        text_x,
        text_y,
        lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_five_ordered_scenes() {
        let catalog = SceneCatalog::new_york();
        let ids: Vec<u8> = catalog.iter().map(|s| s.id.get()).collect();
        assert_eq!(ids, [1, 2, 3, 4, 5]);
        for id in SceneId::all() {
            let scene = catalog.get(id);
            assert_eq!(scene.id, id);
            assert_eq!(scene.y_domain, (0.0, 90_000.0));
            assert!(scene.start <= scene.end);
        }
    }

    #[test]
    fn period_scenes_tile_the_overview() {
        let catalog = SceneCatalog::new_york();
        let overview = catalog.get(SceneId(5));
        let periods: Vec<_> = (1..=4).map(|i| catalog.get(SceneId(i))).collect();
        assert_eq!(periods[0].start, overview.start);
        assert_eq!(periods[3].end, overview.end);
        for pair in periods.windows(2) {
            assert_eq!(pair[0].end.succ_opt(), Some(pair[1].start));
        }
    }

    #[test]
    fn titles_name_the_window() {
        let catalog = SceneCatalog::new_york();
        assert_eq!(
            catalog.get(SceneId(2)).title(),
            "New reported cases by day in New York from 2021-05-02 to 2021-08-08"
        );
    }

    #[test]
    fn overview_is_coloured_by_phase() {
        let catalog = SceneCatalog::new_york();
        let overview = catalog.get(SceneId(5));
        assert_eq!(overview.color_at(day(2021, 2, 1)), RECESSION);
        assert_eq!(overview.color_at(RECESSION_END), RECESSION);
        assert_eq!(overview.color_at(PLATEAU_START), PLATEAU);
        assert_eq!(overview.color_at(day(2021, 10, 1)), FLUCTUATING);
        assert_eq!(overview.color_at(PLATEAU_END), PLATEAU);
        assert_eq!(overview.color_at(FLUCTUATING_END), FLUCTUATING);
        assert_eq!(overview.color_at(SURGE_START), SURGE);
        assert_eq!(overview.color_at(day(2022, 1, 8)), SURGE);
        assert_eq!(overview.legend().len(), 4);
        assert!(catalog.get(SceneId(1)).legend().is_empty());
    }
}
