use super::{Difficulty, DomainError};

/// Validated scalar fields of a problem, as submitted by its owner.
///
/// Every write replaces all of these; blank optional fields are stored as
/// absent rather than as empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemDraft {
    pub name: String,
    pub difficulty: Difficulty,
    pub code: String,
    pub notes: Option<String>,
    pub leetcode_link: Option<String>,
}

impl ProblemDraft {
    pub fn new(
        name: Option<String>,
        difficulty: Option<&str>,
        code: Option<String>,
        notes: Option<String>,
        leetcode_link: Option<String>,
    ) -> Result<Self, DomainError> {
        let name = non_empty(name).ok_or(DomainError::MissingField("name"))?;
        let difficulty = difficulty
            .filter(|value| !value.is_empty())
            .ok_or(DomainError::MissingField("difficulty"))?
            .parse::<Difficulty>()?;
        let code = non_empty(code).ok_or(DomainError::MissingField("code"))?;

        Ok(Self {
            name,
            difficulty,
            code,
            notes: non_empty(notes),
            leetcode_link: non_empty(leetcode_link),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::ProblemDraft;
    use crate::domain::{Difficulty, DomainError};

    fn draft(
        name: Option<&str>,
        difficulty: Option<&str>,
        code: Option<&str>,
    ) -> Result<ProblemDraft, DomainError> {
        ProblemDraft::new(
            name.map(str::to_string),
            difficulty,
            code.map(str::to_string),
            Some(String::new()),
            None,
        )
    }

    #[test]
    fn valid_draft_keeps_fields_and_drops_blank_optionals() {
        let draft = draft(Some("Two Sum"), Some("Easy"), Some("def f(): pass"))
            .expect("draft should be valid");

        assert_eq!(draft.name, "Two Sum");
        assert_eq!(draft.difficulty, Difficulty::Easy);
        assert_eq!(draft.code, "def f(): pass");
        assert_eq!(draft.notes, None);
        assert_eq!(draft.leetcode_link, None);
    }

    #[test]
    fn missing_required_fields_are_reported_in_order() {
        assert_eq!(
            draft(Some(""), Some("Easy"), Some("x")),
            Err(DomainError::MissingField("name"))
        );
        assert_eq!(
            draft(Some("Two Sum"), None, Some("x")),
            Err(DomainError::MissingField("difficulty"))
        );
        assert_eq!(
            draft(Some("Two Sum"), Some("Hard"), None),
            Err(DomainError::MissingField("code"))
        );
    }

    #[test]
    fn unknown_difficulty_is_a_validation_error() {
        assert_eq!(
            draft(Some("Two Sum"), Some("Trivial"), Some("x")),
            Err(DomainError::InvalidDifficulty("Trivial".to_string()))
        );
    }
}
