//! Students and the cohort

use serde::Serialize;

use crate::error::Result;
use crate::validate;

fn is_false(value: &bool) -> bool {
    !*value
}

/// One student of the cohort
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Student {
    omnivox_code: String,
    first_name: String,
    last_name: String,
    alias: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    team: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    is_team_reference: bool,
}

impl Student {
    pub(crate) fn new(
        omnivox_code: String,
        first_name: String,
        last_name: String,
        alias: String,
        team: Option<String>,
        is_team_reference: bool,
    ) -> Self {
        Self {
            omnivox_code,
            first_name,
            last_name,
            alias,
            team,
            is_team_reference,
        }
    }

    pub fn omnivox_code(&self) -> &str {
        &self.omnivox_code
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn team(&self) -> Option<&str> {
        self.team.as_deref()
    }

    /// True for the member whose gradebook stands for the whole team
    pub fn is_team_reference(&self) -> bool {
        self.is_team_reference
    }

    /// "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Validated cohort: unique aliases and omnivox codes, one reference per team
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Students(Vec<Student>);

impl Students {
    pub(crate) fn new(students: Vec<Student>) -> Result<Self> {
        validate::students(&students)?;
        Ok(Self(students))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Student> {
        self.0.iter()
    }

    pub fn by_omnivox(&self, code: &str) -> Option<&Student> {
        self.0.iter().find(|s| s.omnivox_code == code)
    }

    pub fn by_alias(&self, alias: &str) -> Option<&Student> {
        self.0.iter().find(|s| s.alias == alias)
    }

    /// The other members of `student`'s team; empty when it has no team.
    pub fn team_mates(&self, student: &Student) -> Vec<&Student> {
        let Some(team) = student.team() else {
            return Vec::new();
        };
        self.0
            .iter()
            .filter(|s| s.team() == Some(team) && s.omnivox_code != student.omnivox_code)
            .collect()
    }

    /// The reference member of `team`.
    pub fn team_reference(&self, team: &str) -> Option<&Student> {
        self.0
            .iter()
            .find(|s| s.team() == Some(team) && s.is_team_reference)
    }

    /// Distinct team names in order of first appearance.
    pub fn teams(&self) -> Vec<&str> {
        let mut teams: Vec<&str> = Vec::new();
        for team in self.0.iter().filter_map(Student::team) {
            if !teams.contains(&team) {
                teams.push(team);
            }
        }
        teams
    }
}

impl<'a> IntoIterator for &'a Students {
    type Item = &'a Student;
    type IntoIter = std::slice::Iter<'a, Student>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
