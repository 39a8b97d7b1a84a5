//! Roadmap stages

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// The character that separates the main duration text from its footnote
pub const FOOTNOTE_SEPARATOR: char = '*';

/// The unique identifier of a [`Stage`]
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StageId {
    content: String,
}

impl StageId {
    /// Generate a random StageId.
    pub fn random() -> Self {
        let random = Uuid::new_v4().to_hyphenated().to_string();
        Self { content: random }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }
}

impl From<String> for StageId {
    fn from(content: String) -> Self {
        Self { content }
    }
}
impl From<&str> for StageId {
    fn from(content: &str) -> Self {
        Self { content: content.to_string() }
    }
}

impl Display for StageId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.content)
    }
}

/// Used to support serde
impl Serialize for StageId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.content)
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for StageId {
    fn deserialize<D>(deserializer: D) -> Result<StageId, D::Error>
    where
        D: Deserializer<'de>,
    {
        let content = String::deserialize(deserializer)?;
        Ok(StageId{ content })
    }
}


/// One phase of the project
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    /// The stage identifier. It never changes once the stage is created
    pub(crate) id: StageId,
    /// The display title
    title: String,
    /// What has to be done during this stage
    tasks: Vec<String>,
    /// What this stage is expected to deliver
    results: Vec<String>,
    /// Free-form duration text, e.g. `03.02-06.02*if the work starts on Feb 3rd`
    duration: String,
}

impl Stage {
    /// Create a brand new Stage with placeholder content.
    /// This will pick a new (random) stage ID.
    pub fn new() -> Self {
        Self::new_with_parameters(
            StageId::random(),
            "New stage".to_string(),
            vec!["New task".to_string()],
            vec!["New result".to_string()],
            "dd.mm-dd.mm".to_string(),
        )
    }

    /// Create a new Stage instance with a known id, e.g. for seed data
    pub fn new_with_parameters(id: StageId, title: String, tasks: Vec<String>, results: Vec<String>, duration: String) -> Self {
        Self { id, title, tasks, results, duration }
    }

    pub fn id(&self) -> &StageId      { &self.id       }
    pub fn title(&self) -> &str       { &self.title    }
    pub fn tasks(&self) -> &[String]  { &self.tasks    }
    pub fn results(&self) -> &[String] { &self.results }
    pub fn duration(&self) -> &str    { &self.duration }

    /// Splits the duration text into its main part and its optional footnote.
    ///
    /// Only the first separator counts, the footnote keeps any further one.
    pub fn duration_parts(&self) -> (&str, Option<&str>) {
        match self.duration.split_once(FOOTNOTE_SEPARATOR) {
            Some((main, footnote)) => (main, Some(footnote)),
            None => (&self.duration, None),
        }
    }

    pub fn set_title(&mut self, new_title: String) {
        self.title = new_title;
    }

    pub fn set_duration(&mut self, new_duration: String) {
        self.duration = new_duration;
    }

    pub fn set_tasks(&mut self, new_tasks: Vec<String>) {
        self.tasks = new_tasks;
    }

    pub fn set_results(&mut self, new_results: Vec<String>) {
        self.results = new_results;
    }

    pub fn add_task(&mut self, task: String) {
        self.tasks.push(task);
    }

    /// Replace the task at `index`. Returns false if there is no such task
    pub fn set_task(&mut self, index: usize, task: String) -> bool {
        match self.tasks.get_mut(index) {
            Some(existing) => { *existing = task; true },
            None => false,
        }
    }

    /// Remove the task at `index` and return it
    pub fn remove_task(&mut self, index: usize) -> Option<String> {
        if index < self.tasks.len() {
            Some(self.tasks.remove(index))
        } else {
            None
        }
    }

    pub fn add_result(&mut self, result: String) {
        self.results.push(result);
    }

    /// Replace the result at `index`. Returns false if there is no such result
    pub fn set_result(&mut self, index: usize, result: String) -> bool {
        match self.results.get_mut(index) {
            Some(existing) => { *existing = result; true },
            None => false,
        }
    }

    /// Remove the result at `index` and return it
    pub fn remove_result(&mut self, index: usize) -> Option<String> {
        if index < self.results.len() {
            Some(self.results.remove(index))
        } else {
            None
        }
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_stages_get_distinct_ids() {
        let a = Stage::new();
        let b = Stage::new();
        assert_ne!(a.id(), b.id());
        assert!(a.id().as_str().is_empty() == false);
    }

    #[test]
    fn duration_footnote() {
        let mut stage = Stage::new();
        stage.set_duration("03.02-06.02*if the work starts on Feb 3rd".to_string());
        assert_eq!(stage.duration_parts(), ("03.02-06.02", Some("if the work starts on Feb 3rd")));

        stage.set_duration("25.02-04.03".to_string());
        assert_eq!(stage.duration_parts(), ("25.02-04.03", None));

        stage.set_duration("a*b*c".to_string());
        assert_eq!(stage.duration_parts(), ("a", Some("b*c")));
    }

    #[test]
    fn line_edits() {
        let mut stage = Stage::new_with_parameters("1".into(), "A".to_string(), Vec::new(), Vec::new(), String::new());
        stage.add_task("first".to_string());
        stage.add_task("second".to_string());
        assert!(stage.set_task(1, "2nd".to_string()));
        assert!(stage.set_task(5, "nope".to_string()) == false);
        assert_eq!(stage.remove_task(0), Some("first".to_string()));
        assert_eq!(stage.tasks(), &["2nd".to_string()]);
        assert_eq!(stage.remove_result(0), None);
    }

    #[test]
    fn serde_stage() {
        let stage = Stage::new_with_parameters("1".into(), "A".to_string(), vec!["t".to_string()], vec![], "d".to_string());
        let json = serde_json::to_string(&stage).unwrap();
        assert_eq!(json, r#"{"id":"1","title":"A","tasks":["t"],"results":[],"duration":"d"}"#);
        let back: Stage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stage);
    }
}
