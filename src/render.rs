//! Plain-text rendering of a roadmap: stage cards, legend and month grids

use std::fmt::{Display, Formatter};

use chrono::Weekday;
use csscolorparser::Color;
use once_cell::sync::Lazy;

use crate::calendar::{CalendarDay, YearMonth};
use crate::settings;
use crate::stage::{Stage, StageId};
use crate::store::RoadmapData;

/// Colours cycled through by stage position
const PALETTE: [&str; 8] = [
    "#3b82f6", // blue
    "#a855f7", // purple
    "#ec4899", // pink
    "#6366f1", // indigo
    "#22c55e", // green
    "#eab308", // yellow
    "#ef4444", // red
    "#14b8a6", // teal
];

static COLORS: Lazy<Vec<Color>> = Lazy::new(|| {
    PALETTE.iter()
        .filter_map(|hex| match csscolorparser::parse(hex) {
            Ok(color) => Some(color),
            Err(err) => {
                log::warn!("Invalid palette colour {}: {}", hex, err);
                None
            }
        })
        .collect()
});

const WEEK_DAYS: [Weekday; 7] = [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri, Weekday::Sat, Weekday::Sun];

/// The colour of the stage at `index` (0-based) in the roadmap
pub fn stage_color(index: usize) -> Option<&'static Color> {
    if COLORS.is_empty() {
        return None;
    }
    COLORS.get(index % COLORS.len())
}

fn stage_color_hex(index: usize) -> String {
    stage_color(index).map(|c| c.to_hex_string()).unwrap_or_default()
}

/// The label of a stage in the legend and in day cells. Unknown stages are still labelled, by id
pub fn stage_label(roadmap: &RoadmapData, id: &StageId) -> String {
    let prefix = settings::stage_label();
    match (roadmap.stage_index(id), roadmap.stage(id)) {
        (Some(index), Some(stage)) => format!("{} {}: {}", prefix, index + 1, stage.title()),
        _ => format!("{} {}", prefix, id),
    }
}

/// Renders one stage card. `index` is 0-based
pub fn render_stage(index: usize, stage: &Stage) -> String {
    StageCard { index, stage }.to_string()
}

pub fn render_legend(roadmap: &RoadmapData) -> String {
    Legend { roadmap }.to_string()
}

/// Renders a month grid. Days carrying stages are followed by the numbers of these stages
pub fn render_month(year_month: YearMonth, days: &[CalendarDay], roadmap: &RoadmapData) -> String {
    MonthView { year_month, days, roadmap }.to_string()
}

/// Renders the whole roadmap: name, stage cards, legend and the given month grids
pub fn render_roadmap(roadmap: &RoadmapData, months: &[(YearMonth, Vec<CalendarDay>)]) -> String {
    RoadmapView { roadmap, months }.to_string()
}


struct StageCard<'a> {
    index: usize,
    stage: &'a Stage,
}

impl Display for StageCard<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "({}) {}", self.index + 1, self.stage.title())?;

        writeln!(f, "  Tasks")?;
        for task in self.stage.tasks() {
            writeln!(f, "    • {}", task)?;
        }
        writeln!(f, "  Expected results")?;
        for result in self.stage.results() {
            writeln!(f, "    • {}", result)?;
        }

        writeln!(f, "  Duration:")?;
        let (main, footnote) = self.stage.duration_parts();
        writeln!(f, "    {}", main)?;
        if let Some(footnote) = footnote {
            writeln!(f, "    * {}", footnote)?;
        }
        Ok(())
    }
}

struct Legend<'a> {
    roadmap: &'a RoadmapData,
}

impl Display for Legend<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Legend:")?;
        for (index, stage) in self.roadmap.stages().iter().enumerate() {
            writeln!(f, "  [{}] {}", stage_color_hex(index), stage_label(self.roadmap, stage.id()))?;
        }
        Ok(())
    }
}

struct MonthView<'a> {
    year_month: YearMonth,
    days: &'a [CalendarDay],
    roadmap: &'a RoadmapData,
}

impl MonthView<'_> {
    fn cell(&self, day: &CalendarDay) -> String {
        if day.is_current_month() == false {
            return format!("({})", day.day());
        }
        let markers: Vec<String> = day.stages().iter()
            .map(|id| match self.roadmap.stage_index(id) {
                Some(index) => (index + 1).to_string(),
                None => "?".to_string(),
            })
            .collect();
        if markers.is_empty() {
            day.day().to_string()
        } else {
            format!("{}:{}", day.day(), markers.join(","))
        }
    }
}

impl Display for MonthView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.year_month)?;

        for week_day in WEEK_DAYS.iter() {
            write!(f, "{:>8}", format!("{:?}", week_day))?;
        }
        writeln!(f)?;

        for week in self.days.chunks(7) {
            for day in week {
                write!(f, "{:>8}", self.cell(day))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

struct RoadmapView<'a> {
    roadmap: &'a RoadmapData,
    months: &'a [(YearMonth, Vec<CalendarDay>)],
}

impl Display for RoadmapView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.roadmap.company_name())?;
        writeln!(f)?;
        for (index, stage) in self.roadmap.stages().iter().enumerate() {
            writeln!(f, "{}", StageCard { index, stage })?;
        }
        writeln!(f, "{}", Legend { roadmap: self.roadmap })?;
        for (year_month, days) in self.months {
            writeln!(f, "{}", MonthView { year_month: *year_month, days, roadmap: self.roadmap })?;
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{grid, ExclusionPolicy};
    use crate::defaults;

    #[test]
    fn palette_cycles() {
        assert_eq!(stage_color_hex(0), "#3b82f6");
        assert_eq!(stage_color_hex(8), "#3b82f6");
        assert_eq!(stage_color_hex(7), "#14b8a6");
    }

    #[test]
    fn stage_card_footnote() {
        let stages = defaults::default_stages();
        let card = render_stage(0, &stages[0]);
        assert!(card.starts_with("(1) "));
        assert!(card.contains("    03.02-06.02\n"));
        assert!(card.contains("    * при начале работы над блоком 3го февраля\n"));

        let card = render_stage(2, &stages[2]);
        assert!(card.contains("    25.02-04.03\n"));
        assert!(card.contains("* ") == false);
    }

    #[test]
    fn labels() {
        let roadmap = RoadmapData::default();
        assert_eq!(stage_label(&roadmap, &StageId::from("2")), "Этап 2: Основа стилистики");
        assert_eq!(stage_label(&roadmap, &StageId::from("x")), "Этап x");

        let legend = render_legend(&roadmap);
        assert!(legend.contains("  [#a855f7] Этап 2: Основа стилистики\n"));
    }

    #[test]
    fn roadmap_rendering() {
        let roadmap = RoadmapData::default();
        let months: Vec<_> = crate::settings::displayed_months().into_iter()
            .map(|ym| (ym, grid::generate(ym, roadmap.calendar(), &ExclusionPolicy::none())))
            .collect();
        let text = render_roadmap(&roadmap, &months);

        assert!(text.starts_with(&format!("{}\n\n(1) ", roadmap.company_name())));
        assert!(text.contains(&render_stage(3, &roadmap.stages()[3])));
        assert!(text.contains(&render_legend(&roadmap)));
        assert!(text.contains("March 2026\n"));
        assert!(text.contains("10:4"));
    }

    #[test]
    fn month_rendering() {
        let roadmap = RoadmapData::default();
        let feb = YearMonth::new(2026, 2).unwrap();
        let days = grid::generate(feb, roadmap.calendar(), &ExclusionPolicy::none());
        let text = render_month(feb, &days, &roadmap);

        let lines: Vec<&str> = text.lines().collect();
        // Title, header, 6 weeks
        assert_eq!(lines.len(), 8);
        assert!(lines[1].trim_start().starts_with("Mon"));
        assert!(text.contains("4:1"));
        assert!(text.contains("25:3"));
        assert!(text.contains("(26)"));
    }
}
