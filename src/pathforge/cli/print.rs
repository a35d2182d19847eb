use colored::Colorize;
use pathforge::commands::{CmdMessage, CmdResult, MessageLevel};
use pathforge::search::SearchHit;

pub(crate) fn print_result(result: &CmdResult) {
    print_messages(&result.messages);
    if !result.hits.is_empty() {
        print_hits(&result.hits);
    }
}

pub(crate) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

fn print_hits(hits: &[SearchHit]) {
    for hit in hits {
        println!(
            "  {} {} {}",
            format!("{}.", hit.entry.global_number).bold(),
            hit.entry.module_title,
            format!(
                "({}, module {} — score {})",
                hit.entry.section_title, hit.entry.local_number, hit.score
            )
            .dimmed()
        );
    }
}
