use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index;
use crate::model::Session;

/// The reference guide: every addressable pathway, section, and module with
/// the numbers an instruction can use.
pub fn run(session: &Session) -> Result<CmdResult> {
    let mut guide = String::new();
    guide.push_str(&format!(
        "Current Pathway (pathway 1): {}\n",
        session.pathways.current.name
    ));
    guide.push_str(&index::reference_help(&session.pathways.current));

    for (i, past) in session.pathways.past.iter().enumerate() {
        guide.push_str(&format!(
            "\nPast Pathway {} (pathway {}): {} — {} section(s), {} module(s)\n",
            i + 1,
            i + 2,
            past.name,
            past.sections.len(),
            past.module_count()
        ));
    }

    if !session.pending.is_empty() {
        guide.push_str(&format!(
            "\n{} extracted module(s) pending placement.\n",
            session.pending.len()
        ));
    }

    Ok(CmdResult::default().with_message(CmdMessage::info(guide)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Module, Pathway, Section};

    #[test]
    fn guide_names_pathways_sections_and_modules() {
        let mut session = Session::default();
        let mut section = Section::new("Safety Procedures");
        section
            .modules
            .push(Module::new("PPE Requirements".into(), "d".into(), "c".into()));
        session.pathways.current.sections.push(section);
        session.pathways.past.push(Pathway::new("Older Run"));

        let result = run(&session).unwrap();
        let guide = &result.messages[0].content;
        assert!(guide.contains("Current Pathway (pathway 1)"));
        assert!(guide.contains("Section 1: Safety Procedures"));
        assert!(guide.contains("PPE Requirements"));
        assert!(guide.contains("Past Pathway 1 (pathway 2): Older Run"));
    }
}
