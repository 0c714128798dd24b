use super::Difficulty;

/// Narrows a problem listing the way the dashboard's search box and
/// dropdowns do.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProblemFilter {
    /// Case-insensitive substring of the problem name.
    pub search: Option<String>,
    pub difficulty: Option<Difficulty>,
    /// Exact topic name.
    pub topic: Option<String>,
    /// Exact language name.
    pub language: Option<String>,
}

impl ProblemFilter {
    pub fn is_empty(&self) -> bool {
        self.search.is_none()
            && self.difficulty.is_none()
            && self.topic.is_none()
            && self.language.is_none()
    }

    pub fn matches<'a>(
        &self,
        name: &str,
        difficulty: Difficulty,
        mut topics: impl Iterator<Item = &'a str>,
        mut languages: impl Iterator<Item = &'a str>,
    ) -> bool {
        if let Some(search) = &self.search {
            if !name.to_lowercase().contains(&search.to_lowercase()) {
                return false;
            }
        }

        if self.difficulty.is_some_and(|wanted| wanted != difficulty) {
            return false;
        }

        if let Some(topic) = &self.topic {
            if !topics.any(|name| name == topic) {
                return false;
            }
        }

        if let Some(language) = &self.language {
            if !languages.any(|name| name == language) {
                return false;
            }
        }

        true
    }
}
