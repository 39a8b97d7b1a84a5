//! The built-in roadmap, used whenever nothing has been stored yet

use chrono::NaiveDate;

use crate::calendar::{DateRange, DayExclusions, ExclusionPolicy, StageCalendar};
use crate::stage::{Stage, StageId};

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

/// The four seed stages, with ids `"1"` to `"4"`
pub fn default_stages() -> Vec<Stage> {
    vec![
        Stage::new_with_parameters(
            StageId::from("1"),
            "Аналитика и подбор референсов".to_string(),
            lines(&[
                "проведен и проанализирован бриф",
                "подобраны референсы",
                "создан мудборд",
            ]),
            lines(&[
                "согласованный и подписанный документ брифа руководителем",
                "слайд презентации с мудбордом проекта",
            ]),
            "03.02-06.02*при начале работы над блоком 3го февраля".to_string(),
        ),
        Stage::new_with_parameters(
            StageId::from("2"),
            "Основа стилистики".to_string(),
            lines(&[
                "подобраны фирменные шрифтовые пары",
                "подобраны цветовые композиции",
                "разработан логотип и его вариаций (полная версия, сокращенная/сокращенные версии, знак)",
                "разработан графический/графические приемы",
            ]),
            lines(&[
                "слайды презентации с кодами цветовых палитр, графических приемов, логотипами (и правилами их использования) и шрифтовыми парами",
                "векторные и растровые файлы с логотипами, доступные для скачивания",
            ]),
            "09.02-24.02*при начале работы над блоком 9го февраля".to_string(),
        ),
        Stage::new_with_parameters(
            StageId::from("3"),
            "Носители фирменного стиля".to_string(),
            lines(&[
                "разработаны электронные носители",
                "разработаны физические носители",
            ]),
            lines(&[
                "шаблоны и другие электронные файлы, доступные для скачивания и использования в медиапространстве",
                "файлы для печати по требованиям типографии и технические задания для их чтения",
            ]),
            "25.02-04.03".to_string(),
        ),
        Stage::new_with_parameters(
            StageId::from("4"),
            "Визуальная стратегия и работа с медиа-каналами".to_string(),
            lines(&[
                "подобраны референсные кадры/фото-контент",
                "описан характер кадров (для дальнейших генераций в нейросетях)",
                "созданы шаблоны для контента по рубрикам",
            ]),
            lines(&[
                "слайды презентации с референсами и текстовыми пояснениями",
                "шаблоны для работы в программе figma",
            ]),
            "05.03-13.03".to_string(),
        ),
    ]
}

/// The seed date ranges, one per seed stage
pub fn default_calendar() -> StageCalendar {
    let seeds = [
        ((2026, 2, 3), (2026, 2, 6), "1"),
        ((2026, 2, 9), (2026, 2, 24), "2"),
        ((2026, 2, 25), (2026, 3, 4), "3"),
        ((2026, 3, 5), (2026, 3, 13), "4"),
    ];

    let ranges = seeds.iter()
        .filter_map(|&((sy, sm, sd), (ey, em, ed), id)| {
            let start = date(sy, sm, sd)?;
            let end = date(ey, em, ed)?;
            Some(DateRange::new(start, end, StageId::from(id)))
        })
        .collect();
    StageCalendar::from_ranges(ranges)
}

/// The days of the seed roadmap that never display a stage: weekends, February 23rd and March 9th 2026
pub fn default_exclusions() -> ExclusionPolicy {
    let holidays = [date(2026, 2, 23), date(2026, 3, 9)]
        .iter()
        .filter_map(|d| *d)
        .collect();
    ExclusionPolicy::new(DayExclusions::WEEKENDS | DayExclusions::HOLIDAYS, holidays)
}
