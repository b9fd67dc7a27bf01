use std::fmt;

use crate::model::group::Team;

/// Plain-text team listing, suitable for pasting into a chat or notes.
pub struct Summary<'a> {
    teams: &'a [Team],
}

impl<'a> Summary<'a> {
    pub fn new(teams: &'a [Team]) -> Summary<'a> {
        Summary { teams }
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Team composition:")?;
        for team in self.teams {
            writeln!(f)?;
            writeln!(
                f,
                "Team {} ({} members, {} pts):",
                team.id,
                team.len(),
                team.total_score
            )?;
            if team.is_empty() {
                writeln!(f, "(empty)")?;
            }
            for member in &team.members {
                let p = &member.participant;
                writeln!(f, "- {} ({}, {})", p.display_name, p.gender, p.tier)?;
            }
        }
        Ok(())
    }
}

pub fn summarize(teams: &[Team]) -> String {
    Summary::new(teams).to_string()
}
