//! This crate models a project roadmap: a sequence of stages, and a calendar that tells which stage is active on which day.
//!
//! The roadmap is held by a [`RoadmapStore`](store::RoadmapStore), that loads it from (and commits it to) any key-value [`Storage`](traits::Storage). \
//! Stage activity is a set of date ranges, managed by a [`StageCalendar`](calendar::StageCalendar), from which month grids are derived.
//!
//! A [`RoadmapEditor`](editor::RoadmapEditor) wraps everything for a front-end: it is read-only until unlocked by a password,
//! and turns pointer drags over the calendar into stage toggles.

pub mod traits;

pub mod calendar;
pub use calendar::StageCalendar;
mod stage;
pub use stage::{Stage, StageId};

pub mod defaults;
pub mod editor;
pub use editor::RoadmapEditor;
pub mod render;
pub mod storage;
pub mod store;

pub mod settings;
