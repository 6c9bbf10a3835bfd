use crate::{
    command::Outcome,
    game::{
        CurrentCard,
        Tally,
    },
    gateway::types::{
        Button,
        Reply,
    },
};

const HELP_TEXT: &str = "**📘 VocabBot Commands**\n\
-------------------------------------\n\
**Add vocab**\n\
`!add vocab <category> <word:meaning...>`\n\
\n\
**Delete vocab**\n\
`!delete vocab <category> <word>`\n\
\n\
**Delete whole category**\n\
`!delete category <category>`\n\
\n\
**List categories**\n\
`!list categories`\n\
\n\
**List all vocab in category**\n\
`!list vocab <category>`\n\
\n\
**Edit vocab**\n\
`!edit vocab <category> <word> <newMeaning>`\n\
\n\
**Play game**\n\
`!play <category>`\n\
\n\
**Show web link**\n\
`!link`\n\
-------------------------------------";

fn game_buttons() -> Vec<Button> {
    vec![
        Button { id: "learning".to_string(), label: "Still Learning".to_string() },
        Button { id: "remember".to_string(), label: "Remember".to_string() },
        Button { id: "meaning".to_string(), label: "Show Meaning".to_string() },
    ]
}

/// Format a structured dispatch outcome into a reply frame. `None` means
/// the message warrants no reply at all (unrecognized text, or a message
/// swallowed by a pending confirmation).
pub fn render_outcome(outcome: &Outcome, web_link: &str) -> Option<Reply> {
    let text = match outcome {
        Outcome::Help => HELP_TEXT.to_string(),
        Outcome::Link => web_link.to_string(),
        Outcome::StoreOk => "✅ Written to Firestore successfully!".to_string(),
        Outcome::Usage(usage) => format!("❌ Use: `{}`", usage),
        Outcome::ConfirmPrompt { category } => format!(
            "⚠️ Category **{}** does not exist.\nType **yes** to create or **no** to cancel.",
            category
        ),
        Outcome::Cancelled => "❌ Cancelled.".to_string(),
        Outcome::AddReport { category, added, failed, created } => {
            let report = format!(
                "📘 **Category:** {}\n➕ Added: **{}**\n❌ Failed: **{}**",
                category, added, failed
            );
            if *created {
                format!("✅ Category **{}** created! Adding vocab now...\n{}", category, report)
            } else {
                report
            }
        }
        Outcome::VocabDeleted { category, word, .. } => {
            format!("🗑️ Deleted **{}** from **{}**.", word, category)
        }
        Outcome::VocabNotFound { category, word } => {
            format!("❌ Vocab **{}** not found in **{}**.", word, category)
        }
        Outcome::CategoryDeleted { category } => {
            format!("🗑️ Category **{}** deleted.", category)
        }
        Outcome::CategoryNotFound { category } => {
            format!("❌ Category **{}** does not exist.", category)
        }
        Outcome::Categories(categories) => {
            format!("📚 Categories:\n{}", categories.join(", "))
        }
        Outcome::NoCategories => "⚠️ No categories found.".to_string(),
        Outcome::Entries { category, entries } => {
            let mut out = format!("📘 Vocabulary in **{}**:\n", category);
            for entry in entries {
                out.push_str(&format!("• {} → {}\n", entry.word, entry.meaning));
            }
            out
        }
        Outcome::NoEntries { category } => format!("⚠️ No vocab in **{}**.", category),
        Outcome::MeaningUpdated { word, new_meaning, .. } => {
            format!("✏️ Updated **{}** → {}", word, new_meaning)
        }
        Outcome::StoreFailure => {
            "❌ Something went wrong talking to the store. Please try again.".to_string()
        }
        // Routed to the game engine before rendering
        Outcome::StartGame { .. } => return None,
        Outcome::Swallowed | Outcome::NoReply => return None,
    };

    Some(Reply::text(text))
}

/// The card deliberately never carries the meaning, so none is shown here
/// for any response kind.
pub fn card_reply(card: &CurrentCard, replace: bool) -> Reply {
    let content = format!(
        "📘 **Word {}/{}**\n\
         -------------------------------------\n\
         **{}**\n\
         (What is the meaning?)\n\
         -------------------------------------",
        card.position, card.total, card.word
    );
    Reply { content, buttons: game_buttons(), replace }
}

pub fn game_over_reply(category: &str, tally: &Tally, total: usize) -> Reply {
    let content = format!(
        "🏁 **Game Finished!**\n\
         📘 **Category:** {}\n\
         \n\
         **Analysis**\n\
         --------------------------------\n\
         🔵 Still Learning: **{}**\n\
         🟢 Remember: **{}**\n\
         🟡 Show Meaning: **{}**\n\
         --------------------------------\n\
         Total words: **{}**",
        category, tally.still_learning, tally.remembered, tally.meaning_shown, total
    );
    Reply { content, buttons: Vec::new(), replace: true }
}

pub fn empty_category_reply(category: &str) -> Reply {
    Reply::text(format!("⚠️ No vocab found in **{}**.", category))
}

pub fn no_game_reply() -> Reply {
    Reply::text("❌ No game running.")
}

pub fn store_failure_reply() -> Reply {
    Reply::text("❌ Something went wrong talking to the store. Please try again.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Tally;

    #[test]
    fn help_lists_every_command() {
        let reply = render_outcome(&Outcome::Help, "https://example.test/").unwrap();
        for command in
            ["!add vocab", "!delete vocab", "!delete category", "!list categories",
             "!list vocab", "!edit vocab", "!play", "!link"]
        {
            assert!(reply.content.contains(command), "help is missing {}", command);
        }
    }

    #[test]
    fn card_has_buttons_and_no_meaning_slot() {
        let card = CurrentCard { word: "dog".to_string(), position: 2, total: 5 };
        let reply = card_reply(&card, true);
        assert!(reply.replace);
        assert_eq!(reply.buttons.len(), 3);
        assert!(reply.content.contains("**Word 2/5**"));
        assert!(reply.content.contains("**dog**"));
    }

    #[test]
    fn game_over_replaces_the_card_and_drops_buttons() {
        let tally = Tally { still_learning: 1, remembered: 2, meaning_shown: 0 };
        let reply = game_over_reply("animals", &tally, 3);
        assert!(reply.replace);
        assert!(reply.buttons.is_empty());
        assert!(reply.content.contains("Still Learning: **1**"));
        assert!(reply.content.contains("Total words: **3**"));
    }

    #[test]
    fn silent_outcomes_render_to_nothing() {
        assert!(render_outcome(&Outcome::Swallowed, "").is_none());
        assert!(render_outcome(&Outcome::NoReply, "").is_none());
    }
}
